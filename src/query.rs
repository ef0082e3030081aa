use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Turns a user-entered search term into the volumes request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    base:        Url,
    max_results: u32,
}

impl QueryBuilder {
    pub fn new(base: Url, max_results: u32) -> Self {
        Self { base, max_results }
    }

    /// `<base>?q=<term>&maxResults=<n>`, with the term form-urlencoded.
    ///
    /// Empty terms are not rejected; the catalog decides what they mean.
    pub fn build(&self, term: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("q", term)
            .append_pair("maxResults", &self.max_results.to_string());
        url
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            base:        Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_term() {
        let url = QueryBuilder::default().build("android");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=android&maxResults=10"
        );
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let url = QueryBuilder::default().build("dune & messiah=1?#");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=dune+%26+messiah%3D1%3F%23&maxResults=10"
        );
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_string(), "dune & messiah=1?#".to_string()));
    }

    #[test]
    fn non_ascii_term_round_trips() {
        let url = QueryBuilder::default().build("Ибсен");
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0].1, "Ибсен");
        assert!(url.as_str().is_ascii());
    }

    #[test]
    fn empty_term_is_still_a_valid_url() {
        let url = QueryBuilder::default().build("");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=&maxResults=10"
        );
    }

    #[test]
    fn custom_base_keeps_existing_query() {
        let base = Url::parse("http://127.0.0.1:8080/volumes?key=abc").unwrap();
        let url = QueryBuilder::new(base, 3).build("rust");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/volumes?key=abc&q=rust&maxResults=3"
        );
    }
}
