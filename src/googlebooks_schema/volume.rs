use serde::Deserialize;

use crate::types::{BookRecord, UNKNOWN_AUTHOR};

/// One element of the `items` array of a volumes response.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub volume_info: VolumeInfo,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title:                 Option<String>,
    pub authors:               Option<Vec<String>>,
    pub page_count:            Option<u32>,
    pub info_link:             Option<String>,
    pub canonical_volume_link: Option<String>,
}

impl From<Volume> for BookRecord {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        Self {
            title:      info.title.unwrap_or_default(),
            author:     info
                .authors
                .and_then(|authors| authors.into_iter().next())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.into()),
            page_count: info.page_count.unwrap_or_default(),
            detail_url: info
                .info_link
                .or(info.canonical_volume_link)
                .unwrap_or_default(),
        }
    }
}
