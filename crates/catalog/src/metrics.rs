//! Metric deriver: raw product → enriched product.
//!
//! Pure and total over records with a usable price. Nothing here touches
//! shared state; the session catalog decides what to do with rejected
//! records.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use prothunter_core::{CatalogError, CatalogResult, ValueObject};

use crate::product::{EnrichedProduct, RawPrice, RawProduct};

/// Weight substituted when the feed weight is absent, zero or negative.
pub const DEFAULT_WEIGHT_KG: f64 = 1.0;

/// A derived metric that may not apply to a product.
///
/// `NotApplicable` is the single "missing metric" representation (serialized
/// as JSON `null`). It orders after every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Metric {
    Value(f64),
    NotApplicable,
}

impl ValueObject for Metric {}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Metric {
        match self {
            Metric::Value(v) => Metric::from(Some(f(v))),
            Metric::NotApplicable => Metric::NotApplicable,
        }
    }

    /// Two-decimal value for display.
    pub fn rounded(&self) -> Option<f64> {
        self.value().map(round2)
    }

    /// Ascending "best value" order: finite values by magnitude, then
    /// `NotApplicable`.
    pub fn cmp_ascending(&self, other: &Metric) -> Ordering {
        match (self, other) {
            (Metric::Value(a), Metric::Value(b)) => a.total_cmp(b),
            (Metric::Value(_), Metric::NotApplicable) => Ordering::Less,
            (Metric::NotApplicable, Metric::Value(_)) => Ordering::Greater,
            (Metric::NotApplicable, Metric::NotApplicable) => Ordering::Equal,
        }
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() && v >= 0.0 => Metric::Value(v),
            _ => Metric::NotApplicable,
        }
    }
}

impl From<Metric> for Option<f64> {
    fn from(value: Metric) -> Self {
        value.value()
    }
}

impl core::fmt::Display for Metric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{v:.2}"),
            Metric::NotApplicable => f.write_str("n/a"),
        }
    }
}

/// Round to two decimals (display boundary only).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a feed price into a finite, non-negative amount.
///
/// Shop text is cleaned the way the scraper does it: currency sign and
/// "From"/"Desde" prefixes removed, decimal comma turned into a point.
pub fn parse_price(price: &RawPrice) -> CatalogResult<f64> {
    let value = match price {
        RawPrice::Number(n) => *n,
        RawPrice::Text(text) => {
            let cleaned = text
                .replace('€', "")
                .replace("From", "")
                .replace("Desde", "")
                .trim()
                .replace(',', ".");
            cleaned.parse::<f64>().map_err(|_| {
                CatalogError::invalid_product_data(format!("price {text:?} is not numeric"))
            })?
        }
    };

    if !value.is_finite() {
        return Err(CatalogError::invalid_product_data("price is not finite"));
    }
    if value < 0.0 {
        return Err(CatalogError::invalid_product_data(format!(
            "price {value} is negative"
        )));
    }
    Ok(value)
}

/// Effective weight and whether the default was substituted.
fn effective_weight(weight_kg: Option<f64>) -> (f64, bool) {
    match weight_kg {
        Some(w) if w.is_finite() && w > 0.0 => (w, false),
        _ => (DEFAULT_WEIGHT_KG, true),
    }
}

/// Purity outside `[0, 100]` cannot yield a real cost; the product is kept
/// and treated as carrying no purity figure.
fn usable_purity(raw: &RawProduct) -> Option<f64> {
    match raw.protein_percent {
        Some(p) if !p.is_finite() || !(0.0..=100.0).contains(&p) => {
            tracing::warn!(
                product_id = %raw.id,
                protein_percent = p,
                "protein_percent outside [0, 100]; purity ignored"
            );
            None
        }
        other => other,
    }
}

/// Derive the comparison metrics for one product.
///
/// Fails with [`CatalogError::InvalidProductData`] when the price cannot be
/// used. Never returns a NaN or infinite metric.
pub fn derive_metrics(raw: &RawProduct) -> CatalogResult<EnrichedProduct> {
    let price = parse_price(&raw.price)?;
    let protein_percent = usable_purity(raw);
    let (weight_kg, weight_defaulted) = effective_weight(raw.weight_kg);

    if weight_defaulted {
        tracing::debug!(
            product_id = %raw.id,
            feed_weight = ?raw.weight_kg,
            default_weight = DEFAULT_WEIGHT_KG,
            "feed weight unusable; default applied"
        );
    }

    let price_per_kg = price / weight_kg;
    if !price_per_kg.is_finite() {
        return Err(CatalogError::invalid_product_data(format!(
            "price per kg overflows (price={price}, weight_kg={weight_kg})"
        )));
    }

    let real_cost_per_kg = match protein_percent {
        Some(p) if p > 0.0 => {
            let real = Metric::from(Some(price_per_kg / (p / 100.0)));
            if !real.is_applicable() {
                tracing::warn!(
                    product_id = %raw.id,
                    protein_percent = p,
                    "real cost per kg overflows"
                );
            }
            real
        }
        _ => Metric::NotApplicable,
    };

    Ok(EnrichedProduct {
        id: raw.id.clone(),
        name: raw.name.clone(),
        brand: raw.brand.clone(),
        category: raw.category.clone(),
        price,
        weight_kg,
        weight_defaulted,
        protein_percent,
        image: raw.image.clone(),
        link: raw.link.clone(),
        last_update: raw.last_update.clone(),
        price_per_kg,
        real_cost_per_kg,
    })
}
