//! Card badges derived from the metrics.

use serde::{Deserialize, Serialize};

use crate::product::EnrichedProduct;

/// Real price per 100 g of pure protein below which a product is a deal.
pub const DEAL_THRESHOLD_PER_100G: f64 = 3.5;

/// Purity (percent) above which a product counts as premium.
pub const PREMIUM_PURITY_PERCENT: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// Unusually cheap per gram of pure protein.
    Deal,
    /// High purity.
    Premium,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Deal => "deal",
            Badge::Premium => "premium",
        }
    }
}

/// Deal wins over premium; products without a real cost can only be premium.
pub fn badge_for(product: &EnrichedProduct) -> Option<Badge> {
    let is_deal = product
        .real_price_per_100g()
        .value()
        .is_some_and(|v| v < DEAL_THRESHOLD_PER_100G);

    if is_deal {
        Some(Badge::Deal)
    } else if product.purity_or_zero() > PREMIUM_PURITY_PERCENT {
        Some(Badge::Premium)
    } else {
        None
    }
}

impl EnrichedProduct {
    pub fn badge(&self) -> Option<Badge> {
        badge_for(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_metrics;
    use crate::product::RawProduct;
    use prothunter_core::ProductId;

    fn enriched(price: f64, weight: f64, purity: Option<f64>) -> EnrichedProduct {
        let mut raw = RawProduct::new(ProductId::from(1), "p", "b", price).with_weight_kg(weight);
        raw.protein_percent = purity;
        derive_metrics(&raw).unwrap()
    }

    #[test]
    fn cheap_pure_protein_is_a_deal() {
        // 2 kg at 78% for 39.90 -> 2.56 per 100 g pure.
        assert_eq!(enriched(39.9, 2.0, Some(78.0)).badge(), Some(Badge::Deal));
    }

    #[test]
    fn pure_but_pricey_is_premium() {
        // 45.00 / kg at 90% -> 5.00 per 100 g pure.
        assert_eq!(enriched(45.0, 1.0, Some(90.0)).badge(), Some(Badge::Premium));
    }

    #[test]
    fn deal_takes_precedence_over_premium() {
        assert_eq!(enriched(20.0, 1.0, Some(90.0)).badge(), Some(Badge::Deal));
    }

    #[test]
    fn ordinary_product_has_no_badge() {
        // 0.9 kg at 79% for 34.90 -> 4.91 per 100 g pure.
        assert_eq!(enriched(34.9, 0.9, Some(79.0)).badge(), None);
    }

    #[test]
    fn missing_purity_never_earns_a_badge() {
        assert_eq!(enriched(1.0, 1.0, None).badge(), None);
    }
}
