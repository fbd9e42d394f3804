//! Observability for the wholesale storefront services.
//!
//! `StructuredLogger` writes one line per entry to stderr (Spin captures it)
//! and mirrors each entry as a `tracing` event.

mod logging;

pub use logging::*;

// Re-export RequestId from wholesale-core for convenience
pub use wholesale_core::RequestId;
