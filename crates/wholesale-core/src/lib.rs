//! Core request primitives for the wholesale storefront services.
//!
//! This crate provides:
//! - `RequestId` - Unique request identifier for log correlation
//! - `Method` - HTTP method, convertible from `http::Method`
//! - `RequestContext` - Path, query and headers of an incoming request
//! - `parse_query` - Query-string decoding

mod context;
mod query;

pub use context::*;
pub use query::*;
