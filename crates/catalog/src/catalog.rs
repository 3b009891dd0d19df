//! Session catalog: the enriched product set, derived once and shared
//! read-only by every view computation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use prothunter_core::ProductId;

use crate::metrics::derive_metrics;
use crate::product::{EnrichedProduct, RawProduct, normalize_category};
use crate::view::{FilterState, select_view};

/// A feed record that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedProduct {
    /// `None` when the record was too malformed to carry an id.
    pub id: Option<ProductId>,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[EnrichedProduct]>,
    rejected: Vec<RejectedProduct>,
}

impl Catalog {
    /// Enrich every record once. Records the metric deriver refuses are
    /// reported and skipped; the rest keep feed order.
    pub fn from_raw<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawProduct>,
    {
        let mut products = Vec::new();
        let mut rejected = Vec::new();

        for raw in records {
            match derive_metrics(&raw) {
                Ok(product) => products.push(product),
                Err(err) => {
                    tracing::warn!(product_id = %raw.id, error = %err, "product rejected");
                    rejected.push(RejectedProduct {
                        id: Some(raw.id),
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            loaded = products.len(),
            rejected = rejected.len(),
            "catalog enriched"
        );

        Self {
            products: products.into(),
            rejected,
        }
    }

    /// Attach rejections that happened before enrichment (e.g. while decoding the feed).
    pub fn with_rejections(mut self, earlier: Vec<RejectedProduct>) -> Self {
        let mut all = earlier;
        all.append(&mut self.rejected);
        self.rejected = all;
        self
    }

    pub fn products(&self) -> &[EnrichedProduct] {
        &self.products
    }

    pub fn rejected(&self) -> &[RejectedProduct] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn view(&self, query: &FilterState) -> Vec<EnrichedProduct> {
        select_view(&self.products, query)
    }

    /// Distinct categories in first-seen order, for the category buttons.
    /// Spelling variants the category filter treats as equal collapse onto
    /// the first one seen.
    pub fn categories(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for category in self.products.iter().filter_map(|p| p.category.as_deref()) {
            let key = normalize_category(category);
            if key.is_empty() || keys.contains(&key) {
                continue;
            }
            keys.push(key);
            seen.push(category.trim().to_string());
        }
        seen
    }
}
