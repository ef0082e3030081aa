pub mod book_record;
pub mod outcome;

pub use book_record::{BookRecord, UNKNOWN_AUTHOR};
pub use outcome::{Delivery, LoadOutcome, SearchRequest};
