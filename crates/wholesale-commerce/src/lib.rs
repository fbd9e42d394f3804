//! Order domain and shipping-cost policy for the wholesale storefront.
//!
//! - **Shipping**: tiered shipping fee by item count, with explanations and
//!   the reference quotes used to check a schedule
//! - **Orders**: draft orders whose shipping follows their line quantities
//! - **Money**: integer-cent amounts with storefront formatting
//!
//! # Example
//!
//! ```rust
//! use wholesale_commerce::prelude::*;
//!
//! let mut order = DraftOrder::new(ClientId::new("garage-dupont"));
//! order
//!     .add_item(
//!         ProductId::new("brake-pad"),
//!         "BP-200",
//!         "Brake pads",
//!         8,
//!         Money::from_units(12, Currency::EUR),
//!     )
//!     .unwrap();
//!
//! let pricing = order.pricing(&ShippingSchedule::standard()).unwrap();
//! assert_eq!(pricing.shipping_total, Money::from_units(20, Currency::EUR));
//! assert_eq!(pricing.grand_total.display_fr(), "116,00\u{a0}€");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod order;
pub mod shipping;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use shipping::{calculate_shipping_cost, get_shipping_details};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Shipping
    pub use crate::shipping::{
        calculate_shipping_cost, get_shipping_details, run_reference_fixtures, FixtureReport,
        FixtureResult, ShippingDetails, ShippingSchedule, Tier, TierKind, TierRule,
    };

    // Orders
    pub use crate::order::{DraftOrder, OrderLine, OrderPricing, OrderStatus};
}
