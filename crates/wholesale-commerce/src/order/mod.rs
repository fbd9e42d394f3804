//! Draft orders.
//!
//! A B2B client builds an order as a draft; its shipping fee is recomputed
//! from the summed line quantities every time it is priced.

mod draft;
mod pricing;
mod status;

pub use draft::{DraftOrder, OrderLine, MAX_QUANTITY_PER_LINE};
pub use pricing::OrderPricing;
pub use status::OrderStatus;
