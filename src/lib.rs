pub mod config;
pub mod connectivity;
pub mod default_colors;
pub mod error;
pub mod fetch;
pub mod googlebooks_schema;
pub mod loader;
pub mod parse;
pub mod query;
pub mod traits;
pub mod types;

pub use error::SearchError;
pub use loader::{LoaderState, Pump, SearchLoader};
