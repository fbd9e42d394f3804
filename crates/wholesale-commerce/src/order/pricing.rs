//! Order pricing breakdown.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Totals of an order, shipping included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPricing {
    /// Sum of line quantities; the shipping schedule input.
    pub total_items: i64,
    /// Sum of line totals.
    pub subtotal: Money,
    pub shipping_total: Money,
    /// Label of the shipping tier applied.
    pub shipping_explanation: String,
    /// subtotal + shipping
    pub grand_total: Money,
}

impl OrderPricing {
    /// Share of the grand total spent on shipping, in percent.
    pub fn shipping_share(&self) -> f64 {
        if self.grand_total.amount_cents == 0 {
            return 0.0;
        }
        (self.shipping_total.amount_cents as f64 / self.grand_total.amount_cents as f64) * 100.0
    }
}
