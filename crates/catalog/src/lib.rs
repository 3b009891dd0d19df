//! Catalog module for the supplement comparison viewer.
//!
//! This crate contains the comparison logic (metric derivation, filtering,
//! sorting), implemented purely as deterministic functions over in-memory
//! records (no IO, no rendering).

pub mod badge;
pub mod catalog;
pub mod metrics;
pub mod product;
pub mod view;

pub use badge::{Badge, badge_for};
pub use catalog::{Catalog, RejectedProduct};
pub use metrics::{DEFAULT_WEIGHT_KG, Metric, derive_metrics, parse_price, round2};
pub use product::{
    Category, EnrichedProduct, LAST_UPDATE_FORMAT, RawPrice, RawProduct, normalize_category,
};
pub use view::{
    CategoryFilter, FilterState, SortKey, is_purity_sort_applicable, matches_search, select_view,
};
