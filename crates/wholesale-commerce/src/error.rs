//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in order and shipping operations.
#[derive(Error, Debug, PartialEq)]
pub enum CommerceError {
    /// Line not in the order.
    #[error("Line not in order: {0}")]
    LineNotInOrder(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Negative unit price, in cents.
    #[error("Invalid unit price: {0} cents")]
    InvalidPrice(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Order is no longer a draft.
    #[error("Order is {0} and can no longer be edited")]
    OrderNotEditable(String),

    /// Submitting an order without lines.
    #[error("Cannot submit an empty order")]
    EmptyOrder,

    /// Invalid order status transition.
    #[error("Invalid order transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Shipping schedule rejected by validation.
    #[error("Invalid shipping schedule: {0}")]
    InvalidSchedule(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
