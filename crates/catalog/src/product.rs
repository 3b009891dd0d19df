use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use prothunter_core::{ProductId, ValueObject};

use crate::metrics::Metric;

/// Format of the feed's `last_update` stamp (e.g. `18/10/2026 14:30`).
pub const LAST_UPDATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Closed set of category tags the catalog knows about.
///
/// Anything the feed sends that is not recognized passes through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Protein powders (whey, isolate, vegan blends). Carries a purity metric.
    Protein,
    /// Creatine. No purity metric applies.
    #[serde(rename = "creatina")]
    Creatine,
    #[serde(untagged)]
    Other(String),
}

impl ValueObject for Category {}

/// Canonical form of a category name: trimmed, Unicode-lowercased. Every
/// category comparison goes through this.
pub fn normalize_category(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Category {
    /// Map a feed or selector value onto a category tag (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let lower = normalize_category(name);
        match lower.as_str() {
            "protein" => Category::Protein,
            "creatina" | "creatine" => Category::Creatine,
            _ => Category::Other(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Protein => "protein",
            Category::Creatine => "creatina",
            Category::Other(name) => name,
        }
    }

    /// Whether products in this category carry a meaningful purity figure.
    pub fn carries_purity(&self) -> bool {
        matches!(self, Category::Protein)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price as it arrives from the feed.
///
/// The scraper emits plain numbers, but shop text such as `"Desde 34,99 €"`
/// has shown up too. Parsing into a number happens in the metric deriver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

/// One product record from the feed, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    /// Older feeds call this field `type`.
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: RawPrice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl RawProduct {
    /// Minimal record; the remaining fields are set with the `with_*` builders.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: impl Into<RawPrice>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            brand: brand.into(),
            category: None,
            price: price.into(),
            weight_kg: None,
            protein_percent: None,
            image: None,
            link: None,
            last_update: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn with_protein_percent(mut self, protein_percent: f64) -> Self {
        self.protein_percent = Some(protein_percent);
        self
    }

    pub fn with_last_update(mut self, last_update: impl Into<String>) -> Self {
        self.last_update = Some(last_update.into());
        self
    }

    /// Parsed `last_update`, if present and well-formed.
    pub fn last_updated_at(&self) -> Option<NaiveDateTime> {
        parse_last_update(self.last_update.as_deref())
    }
}

fn parse_last_update(stamp: Option<&str>) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp?.trim(), LAST_UPDATE_FORMAT).ok()
}

/// A product with its comparison metrics derived.
///
/// Numeric fields are unrounded; rounding is a display concern
/// (see [`crate::metrics::round2`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: Option<String>,
    pub price: f64,
    /// Weight used for the metrics (after defaulting).
    pub weight_kg: f64,
    /// True when the feed weight was absent or unusable and the default was applied.
    pub weight_defaulted: bool,
    pub protein_percent: Option<f64>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub last_update: Option<String>,
    pub price_per_kg: f64,
    pub real_cost_per_kg: Metric,
}

impl EnrichedProduct {
    /// Purity used for ordering: absent or non-positive counts as zero.
    pub fn purity_or_zero(&self) -> f64 {
        match self.protein_percent {
            Some(p) if p > 0.0 => p,
            _ => 0.0,
        }
    }

    /// Price of 100 g of pure active ingredient.
    pub fn real_price_per_100g(&self) -> Metric {
        self.real_cost_per_kg.map(|per_kg| per_kg / 10.0)
    }

    pub fn last_updated_at(&self) -> Option<NaiveDateTime> {
        parse_last_update(self.last_update.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_are_case_insensitive() {
        assert_eq!(Category::from_name("Protein"), Category::Protein);
        assert_eq!(Category::from_name(" CREATINA "), Category::Creatine);
        assert_eq!(
            Category::from_name("Vegan"),
            Category::Other("vegan".to_string())
        );
    }

    #[test]
    fn only_protein_carries_purity() {
        assert!(Category::Protein.carries_purity());
        assert!(!Category::Creatine.carries_purity());
        assert!(!Category::Other("whey".to_string()).carries_purity());
    }

    #[test]
    fn raw_product_decodes_scraper_record() {
        let json = r#"{
            "id": "hsn",
            "brand": "HSN",
            "name": "Evowhey Protein 2.0",
            "price": 39.9,
            "image": "img/whey-protein.jpg",
            "weight_kg": 2.0,
            "protein_percent": 78,
            "link": "https://www.hsnstore.com/",
            "last_update": "18/10/2026 09:15"
        }"#;

        let raw: RawProduct = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id.as_str(), "hsn");
        assert_eq!(raw.price, RawPrice::Number(39.9));
        assert_eq!(raw.weight_kg, Some(2.0));
        assert_eq!(raw.protein_percent, Some(78.0));
        assert_eq!(raw.category, None);

        let stamp = raw.last_updated_at().unwrap();
        assert_eq!(stamp.format("%Y-%m-%d %H:%M").to_string(), "2026-10-18 09:15");
    }

    #[test]
    fn legacy_type_key_is_read_as_category() {
        let json = r#"{
            "id": 3, "name": "IsoPrime CFM", "brand": "Amix", "type": "isolate", "price": 45.0
        }"#;
        let raw: RawProduct = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id.as_str(), "3");
        assert_eq!(raw.category.as_deref(), Some("isolate"));
    }

    #[test]
    fn text_price_is_kept_raw() {
        let json = r#"{"id": "x", "name": "n", "brand": "b", "price": "Desde 34,99 €"}"#;
        let raw: RawProduct = serde_json::from_str(json).unwrap();
        assert_eq!(raw.price, RawPrice::Text("Desde 34,99 €".to_string()));
    }

    #[test]
    fn malformed_last_update_is_none() {
        let raw = RawProduct::new(ProductId::from(1), "n", "b", 10.0).with_last_update("yesterday");
        assert!(raw.last_updated_at().is_none());
    }

    #[test]
    fn enriched_product_keeps_feed_freshness() {
        let raw = RawProduct::new(ProductId::from(1), "n", "b", 10.0)
            .with_last_update("02/03/2026 07:05");
        let stamped = crate::metrics::derive_metrics(&raw).unwrap();
        let stamp = stamped.last_updated_at().unwrap();
        assert_eq!(stamp.format(LAST_UPDATE_FORMAT).to_string(), "02/03/2026 07:05");

        let unstamped =
            crate::metrics::derive_metrics(&RawProduct::new(ProductId::from(2), "n", "b", 10.0))
                .unwrap();
        assert!(unstamped.last_updated_at().is_none());
    }

    #[test]
    fn category_normalization_folds_unicode_case() {
        assert_eq!(normalize_category(" Proteína "), normalize_category("PROTEÍNA"));
        assert_eq!(normalize_category("PROTEÍNA"), "proteína");
    }
}
