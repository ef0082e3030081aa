use crate::{error::SearchError, types::book_record::BookRecord};

/// A single issued search, tagged with the loader generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query:      String,
    pub generation: u64,
}

/// Terminal result of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Success(Vec<BookRecord>),
    Failure(SearchError),
}

impl From<Result<Vec<BookRecord>, SearchError>> for LoadOutcome {
    fn from(result: Result<Vec<BookRecord>, SearchError>) -> Self {
        match result {
            Ok(records) => Self::Success(records),
            Err(e) => Self::Failure(e),
        }
    }
}

/// What the presentation layer receives: the outcome plus the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub request: SearchRequest,
    pub outcome: LoadOutcome,
}
