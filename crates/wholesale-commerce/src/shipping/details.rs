//! Shipping cost with its human-readable explanation.

use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};
use crate::shipping::schedule::Tier;

/// Which part of the schedule priced an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    /// No items, no fee.
    Empty,
    Flat,
    Interpolated,
    /// Past the last tier, priced per unit.
    Tail,
}

/// A shipping quote as shown to the buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingDetails {
    /// Item count the quote was computed for.
    pub total_items: i64,
    /// Fee in whole euros; exact for every item count.
    pub cost_units: i64,
    /// Fee as money. Saturates at `i64::MAX` cents for counts whose fee
    /// does not fit in cents; `cost_units` stays exact.
    pub cost: Money,
    /// Label of the tier that matched, in French.
    pub explanation: String,
    pub tier: TierKind,
}

impl ShippingDetails {
    pub(crate) fn empty(total_items: i64) -> Self {
        Self {
            total_items,
            cost_units: 0,
            cost: Money::zero(Currency::EUR),
            explanation: "Aucun produit".to_string(),
            tier: TierKind::Empty,
        }
    }

    pub(crate) fn for_tier(total_items: i64, cost: i64, tier: &Tier) -> Self {
        let kind = tier.kind();
        let explanation = match kind {
            TierKind::Interpolated => format!(
                "Frais dégressifs pour {}-{} produits",
                tier.min_items, tier.max_items
            ),
            _ => format!("Frais pour {}-{} produits", tier.min_items, tier.max_items),
        };
        Self {
            total_items,
            cost_units: cost,
            cost: Money::from_units(cost, Currency::EUR),
            explanation,
            tier: kind,
        }
    }

    pub(crate) fn for_tail(total_items: i64, cost: i64, tail_rate: f64) -> Self {
        Self {
            total_items,
            cost_units: cost,
            cost: Money::from_units(cost, Currency::EUR),
            explanation: format!(
                "Environ {}€ par produit pour {} produits",
                tail_rate.round() as i64,
                total_items
            ),
            tier: TierKind::Tail,
        }
    }

    /// Fee in whole euros.
    pub fn cost_units(&self) -> i64 {
        self.cost_units
    }

    /// Fee in storefront format, e.g. `"35,00 €"`.
    pub fn formatted_cost(&self) -> String {
        Money::display_units_fr(self.cost_units, self.cost.currency)
    }
}
