use crate::{config::Config, traits::DisplayTerminal};

/// Shown in place of the author when a volume lists none.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One search hit, built once from a single volume of the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title:      String,
    pub author:     String,
    pub page_count: u32,
    /// Handed to whatever opens the volume's page, never checked here.
    pub detail_url: String,
}

impl Default for BookRecord {
    fn default() -> Self {
        Self {
            title:      String::new(),
            author:     UNKNOWN_AUTHOR.into(),
            page_count: 0,
            detail_url: String::new(),
        }
    }
}

impl DisplayTerminal for BookRecord {
    fn fmt_to_string(&self, config: &Config) -> String {
        let title = config.output_title.format_str(&self.title);
        let author = config.output_author.format_str(&self.author);
        let pages = config.output_page_count.format_str(self.page_count);
        format!("{title} {author} {pages}")
    }
}

impl std::fmt::Display for BookRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}
