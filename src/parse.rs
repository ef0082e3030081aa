use serde_json::Value;
use tracing::debug;

use crate::{error::SearchError, googlebooks_schema::volume::Volume, types::BookRecord};

/// Maps a volumes response body to records, in server order.
///
/// Only a body that isn't JSON at all is an error. A missing or empty `items`
/// array yields no records, and items that don't fit the volume shape are
/// skipped one by one.
pub fn parse(body: &str) -> Result<Vec<BookRecord>, SearchError> {
    let root: Value = serde_json::from_str(body)?;
    let items = match root.get("items") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            debug!("`items` is not an array ({other}), treating as no results");
            return Ok(vec![]);
        }
        None => return Ok(vec![]),
    };

    let records = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match parse_item(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping item {i}: {} at `{}`", e.inner(), e.path());
                None
            }
        })
        .collect();
    Ok(records)
}

fn parse_item(item: &Value) -> Result<BookRecord, serde_path_to_error::Error<serde_json::Error>> {
    let volume: Volume = serde_path_to_error::deserialize(item)?;
    Ok(volume.into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn top_level_array_is_no_results() {
        assert_eq!(parse("[1, 2, 3]"), Ok(vec![]));
    }

    #[test]
    fn items_of_wrong_type_is_no_results() {
        assert_eq!(parse(r#"{"items": {"volumeInfo": {}}}"#), Ok(vec![]));
        assert_eq!(parse(r#"{"items": null}"#), Ok(vec![]));
    }

    #[test]
    fn canonical_link_is_fallback() {
        let body = r#"{"items": [
            {"volumeInfo": {"title": "A", "infoLink": "info", "canonicalVolumeLink": "canon"}},
            {"volumeInfo": {"title": "B", "canonicalVolumeLink": "canon"}}
        ]}"#;
        let records = parse(body).unwrap();
        assert_eq!(records[0].detail_url, "info");
        assert_eq!(records[1].detail_url, "canon");
    }
}
