//! HTTP handlers for the wholesale storefront's shipping diagnostics.
//!
//! Handlers are plain functions from a `RequestContext` to an
//! `http::Response<String>`, so the same code runs inside the Spin component
//! and in native tests.
//!
//! # Example
//!
//! ```rust
//! use wholesale_api::DiagnosticsService;
//! use wholesale_core::{Method, RequestContext};
//! use wholesale_observability::StructuredLogger;
//!
//! let service = DiagnosticsService::default();
//! let ctx = RequestContext::new(Method::Get, "/api/shipping?items=14");
//! let logger = StructuredLogger::new(ctx.request_id.clone());
//!
//! let response = service.handle(&ctx, &logger);
//! assert_eq!(response.status(), 200);
//! assert!(response.body().contains(r#""shippingCost":25"#));
//! ```

mod diagnostics;
mod error;
mod response;

pub use diagnostics::{
    parse_item_count, DiagnosticsService, FixtureBattery, ScheduleDescription, ShippingQuote,
    SCHEDULE_PATH, SHIPPING_PATH,
};
pub use error::{ApiError, ErrorBody};
pub use response::{error_response, json_response, REQUEST_ID_HEADER};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiError, DiagnosticsService, ShippingQuote};
}
