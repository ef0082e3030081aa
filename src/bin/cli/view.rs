use std::sync::Arc;

use booksearch::{
    config::Config,
    error::SearchError,
    traits::{DisplayTerminal, OutcomeSink},
    types::{BookRecord, Delivery, LoadOutcome},
};

/// Prints deliveries and remembers the last list so rows can be opened.
pub struct TerminalView {
    config:  Arc<Config>,
    results: Vec<BookRecord>,
    status:  String,
}

impl TerminalView {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            results: vec![],
            status: String::new(),
        }
    }

    /// Rows are numbered from 1, as printed.
    pub fn book(&self, index: usize) -> Option<&BookRecord> {
        index.checked_sub(1).and_then(|i| self.results.get(i))
    }

    fn link_line(&self, index: usize) -> String {
        match self.book(index) {
            Some(book) if !book.detail_url.is_empty() => {
                self.config.output_link.format_str(&book.detail_url)
            }
            Some(book) => self
                .config
                .output_empty
                .format_str(format!("No link for {book}.")),
            None => self
                .config
                .output_error
                .format_str(format!("No book number {index} in the last search.")),
        }
    }

    pub fn print_link(&self, index: usize) {
        println!("{}", self.link_line(index));
    }

    pub fn print_cancelled(&self, query: &str) {
        println!(
            "{}",
            self.config
                .output_empty
                .format_str(format!("Search for {query:?} cancelled."))
        );
    }

    /// One-line summary of the last delivery, shown in the prompt.
    pub fn status(&self) -> &str {
        &self.status
    }

    fn render(&mut self, delivery: Delivery) -> Vec<String> {
        self.results.clear();
        let query = delivery.request.query;
        match delivery.outcome {
            LoadOutcome::Success(books) if books.is_empty() => {
                self.status = format!("no results for {query:?}");
                vec![self.config.output_empty.format_str("No books found.")]
            }
            LoadOutcome::Success(books) => {
                let lines = books
                    .iter()
                    .enumerate()
                    .map(|(i, book)| {
                        let index = self.config.output_index.format_str(i + 1);
                        format!("{index} {}", book.fmt_to_string(&self.config))
                    })
                    .collect();
                self.status = format!("{} results for {query:?}", books.len());
                self.results = books;
                lines
            }
            LoadOutcome::Failure(SearchError::NoConnectivity) => {
                self.status = "offline".into();
                vec![SearchError::NoConnectivity.fmt_to_string(&self.config)]
            }
            LoadOutcome::Failure(e) => {
                self.status = "search failed".into();
                vec![e.fmt_to_string(&self.config)]
            }
        }
    }
}

impl OutcomeSink for TerminalView {
    fn deliver(&mut self, delivery: Delivery) {
        for line in self.render(delivery) {
            println!("{line}");
        }
    }
}
