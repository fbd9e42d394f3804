//! Shipping-cost policy.
//!
//! The fee depends only on how many units an order contains. Small orders
//! pay a flat per-shipment fee; between 46 and 380 units the fee follows
//! linear interpolation between business-supplied anchor points; past the
//! last tier every unit costs `tail_rate`.
//!
//! ```
//! use wholesale_commerce::shipping::{calculate_shipping_cost, get_shipping_details};
//!
//! assert_eq!(calculate_shipping_cost(8), 20);
//! assert_eq!(calculate_shipping_cost(200), 172);
//! assert_eq!(get_shipping_details(20).explanation, "Frais pour 15-36 produits");
//! ```

mod details;
mod fixtures;
mod schedule;

pub use details::{ShippingDetails, TierKind};
pub use fixtures::{run_reference_fixtures, FixtureReport, FixtureResult, REFERENCE_FIXTURES};
pub use schedule::{
    interpolate, Anchor, BoundaryCheck, ShippingSchedule, Tier, TierRule, STANDARD_TAIL_RATE,
};

/// Shipping cost in whole euros for `total_items` units on the standard schedule.
///
/// Zero and negative counts cost nothing.
pub fn calculate_shipping_cost(total_items: i64) -> i64 {
    schedule::standard_cost(total_items)
}

/// Cost and human-readable tier label on the standard schedule.
pub fn get_shipping_details(total_items: i64) -> ShippingDetails {
    schedule::standard_details(total_items)
}
