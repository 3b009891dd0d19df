//! `prothunter-core` — catalog foundation building blocks.
//!
//! This crate contains **pure** primitives shared by the catalog crates
//! (no IO, no rendering concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{CatalogError, CatalogResult};
pub use id::ProductId;
pub use value_object::ValueObject;
