//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog core.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Keep this focused on deterministic data failures (malformed records,
/// invalid identifiers). Feed transport and decoding errors belong to the
/// feed crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product record carried data the metric deriver cannot work with
    /// (non-numeric or negative price, a price per kg that overflows).
    #[error("invalid product data: {0}")]
    InvalidProductData(String),

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl CatalogError {
    pub fn invalid_product_data(msg: impl Into<String>) -> Self {
        Self::InvalidProductData(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
