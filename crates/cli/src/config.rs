//! Runtime configuration, read once from the environment.

use std::path::PathBuf;

use prothunter_catalog::FilterState;

pub const FEED_ENV: &str = "PROTHUNTER_FEED";
pub const SEARCH_ENV: &str = "PROTHUNTER_SEARCH";
pub const CATEGORY_ENV: &str = "PROTHUNTER_CATEGORY";
pub const SORT_ENV: &str = "PROTHUNTER_SORT";
pub const OUTPUT_ENV: &str = "PROTHUNTER_OUTPUT";

pub const DEFAULT_FEED_PATH: &str = "data.json";

pub const USAGE: &str = "usage: prothunter [FEED_PATH]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub feed_path: PathBuf,
    pub search: String,
    pub category: String,
    pub sort: String,
    pub output: OutputFormat,
}

impl CliConfig {
    /// Environment variables, with the first positional argument overriding
    /// the feed path. The binary takes no options: `prothunter [FEED_PATH]`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), std::env::args().nth(1))
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        feed_arg: Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(arg) = feed_arg.as_deref().filter(|a| a.starts_with('-')) {
            anyhow::bail!("unrecognized option {arg:?}; filters come from env vars\n{USAGE}");
        }

        let feed_path = feed_arg
            .or_else(|| lookup(FEED_ENV))
            .unwrap_or_else(|| {
                tracing::debug!("{FEED_ENV} not set; using {DEFAULT_FEED_PATH}");
                DEFAULT_FEED_PATH.to_string()
            });

        let output = match lookup(OUTPUT_ENV).as_deref().map(str::trim) {
            None | Some("") | Some("table") => OutputFormat::Table,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                tracing::warn!("unknown {OUTPUT_ENV}={other:?}; falling back to table");
                OutputFormat::Table
            }
        };

        Ok(Self {
            feed_path: PathBuf::from(feed_path),
            search: lookup(SEARCH_ENV).unwrap_or_default(),
            category: lookup(CATEGORY_ENV).unwrap_or_else(|| "all".to_string()),
            sort: lookup(SORT_ENV).unwrap_or_default(),
            output,
        })
    }

    pub fn filter_state(&self) -> FilterState {
        FilterState::from_selectors(&self.search, &self.category, &self.sort)
    }
}
