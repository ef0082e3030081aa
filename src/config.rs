use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    default_colors::*,
    fetch::{FetchTimeouts, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS},
    query::{QueryBuilder, DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS},
};

pub const CONFIG_FILE: &str = "booksearch.toml";
pub const ENV_PREFIX: &str = "BOOKSEARCH_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            return format!("{prefix}{content}{suffix}");
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} {content}{suffix}")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url:           String,
    pub max_results:        u32,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms:    u64,
    pub force_offline:      bool,
    pub initial_query:      Option<String>,
    pub history_file:       PathBuf,
    pub output_index:       OutputConfig,
    pub output_title:       OutputConfig,
    pub output_author:      OutputConfig,
    pub output_page_count:  OutputConfig,
    pub output_link:        OutputConfig,
    pub output_empty:       OutputConfig,
    pub output_error:       OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    /// Defaults, then `booksearch.toml`, then `BOOKSEARCH_*` variables.
    pub fn read_config() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        // Surface a bad base url at startup instead of on the first search.
        Url::parse(&config.base_url)?;
        Ok(config)
    }

    pub fn query_builder(&self) -> Result<QueryBuilder> {
        Ok(QueryBuilder::new(
            Url::parse(&self.base_url)?,
            self.max_results,
        ))
    }

    pub fn fetch_timeouts(&self) -> FetchTimeouts {
        FetchTimeouts {
            connect: Duration::from_millis(self.connect_timeout_ms),
            read:    Duration::from_millis(self.read_timeout_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url:           DEFAULT_BASE_URL.into(),
            max_results:        DEFAULT_MAX_RESULTS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms:    DEFAULT_READ_TIMEOUT_MS,
            force_offline:      false,
            initial_query:      Some("android".into()),
            history_file:       PathBuf::from("history.txt"),
            output_index:       OutputConfig {
                suffix: ".".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_title:       OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_BOOK,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:      OutputConfig {
                prefix: "[".into(),
                suffix: "]".into(),
                description: "Written by:".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_page_count:  OutputConfig {
                prefix: "[".into(),
                suffix: "]".into(),
                description: "Pages:".into(),
                style_content: StyleConfig {
                    color: COLOR_PAGE_COUNT,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_link:        OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_LINK,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_empty:       OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    italic: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:       OutputConfig {
                description: "Error:".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}
