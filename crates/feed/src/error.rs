use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feed must be a JSON array of products (found {found})")]
    NotAnArray { found: &'static str },
}
