//! Filter/sort engine: enriched products + filter state → ordered view.
//!
//! Stateless. Every call works on a fresh `Vec`; the caller's slice is only
//! borrowed, so the cached catalog stays a faithful base for the next query.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::product::{Category, EnrichedProduct, normalize_category};

/// Sort options offered by the catalog's sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Cheapest list price first.
    PriceAsc,
    /// Purest first; products without a purity figure count as 0%.
    PurityDesc,
    /// Cheapest real cost per kg of pure ingredient first; products without
    /// the metric go last.
    RealValue,
    /// Keep feed order.
    #[default]
    Unsorted,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price_asc",
            SortKey::PurityDesc => "purity_desc",
            SortKey::RealValue => "real_value",
            SortKey::Unsorted => "",
        }
    }

    /// Whether this key only makes sense for purity-bearing categories.
    pub fn needs_purity(&self) -> bool {
        matches!(self, SortKey::PurityDesc | SortKey::RealValue)
    }

    /// Sort keys worth offering for the given category selector value.
    pub fn available_for(category: &str) -> &'static [SortKey] {
        if is_purity_sort_applicable(category) {
            &[
                SortKey::Unsorted,
                SortKey::PriceAsc,
                SortKey::PurityDesc,
                SortKey::RealValue,
            ]
        } else {
            &[SortKey::Unsorted, SortKey::PriceAsc]
        }
    }

    fn compare(&self, a: &EnrichedProduct, b: &EnrichedProduct) -> Ordering {
        match self {
            SortKey::PriceAsc => a.price.total_cmp(&b.price),
            SortKey::PurityDesc => b.purity_or_zero().total_cmp(&a.purity_or_zero()),
            SortKey::RealValue => a.real_cost_per_kg.cmp_ascending(&b.real_cost_per_kg),
            SortKey::Unsorted => Ordering::Equal,
        }
    }
}

/// Unknown selector values fall back to feed order.
impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "price_asc" => SortKey::PriceAsc,
            "purity_desc" => SortKey::PurityDesc,
            "real_value" => SortKey::RealValue,
            _ => SortKey::Unsorted,
        })
    }
}

/// Category selector value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    /// Only products whose category equals this name (case-insensitive).
    Only(String),
}

impl CategoryFilter {
    /// `all`, `todo` and the empty string mean "no category filter".
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("todo")
        {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(normalize_category(trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(name) => name,
        }
    }

    /// Products without a category never match a specific category.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => {
                category.is_some_and(|c| normalize_category(c) == *wanted)
            }
        }
    }
}

/// Everything the UI feeds into one view computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub category: CategoryFilter,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Build from raw selector values.
    pub fn from_selectors(search_text: &str, category: &str, sort_key: &str) -> Self {
        Self {
            search_text: search_text.to_string(),
            category: CategoryFilter::parse(category),
            sort_key: sort_key.parse().unwrap_or_default(),
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = CategoryFilter::parse(category);
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }
}

/// Case-insensitive substring match on name or brand. Only the empty string
/// matches everything; whitespace is part of the needle.
pub fn matches_search(product: &EnrichedProduct, search_text: &str) -> bool {
    let needle = search_text.to_lowercase();
    needle.is_empty() || matches_lowered(product, &needle)
}

fn matches_lowered(product: &EnrichedProduct, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle) || product.brand.to_lowercase().contains(needle)
}

/// Whether the purity and real-value sorts are meaningful for a category
/// selector value. Only the purity-bearing category qualifies.
pub fn is_purity_sort_applicable(category: &str) -> bool {
    Category::from_name(category).carries_purity()
}

/// Compute the ordered subset to display.
///
/// Filters are ANDed; the sort is stable, so equal keys keep feed order.
pub fn select_view(products: &[EnrichedProduct], query: &FilterState) -> Vec<EnrichedProduct> {
    let needle = query.search_text.to_lowercase();

    let mut view: Vec<EnrichedProduct> = products
        .iter()
        .filter(|p| needle.is_empty() || matches_lowered(p, &needle))
        .filter(|p| query.category.matches(p.category.as_deref()))
        .cloned()
        .collect();

    if query.sort_key != SortKey::Unsorted {
        view.sort_by(|a, b| query.sort_key.compare(a, b));
    }

    tracing::trace!(
        total = products.len(),
        shown = view.len(),
        sort_key = query.sort_key.as_str(),
        category = query.category.as_str(),
        "view selected"
    );

    view
}
