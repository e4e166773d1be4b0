//! Payment errors.

use crate::client::FetchError;
use thiserror::Error;

/// Errors that can occur when initiating a payment.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Amount must be positive.
    #[error("invalid payment amount: {0}")]
    InvalidAmount(f64),

    /// The gateway rejected the request.
    #[error("gateway error: {0}")]
    Gateway(String),

    /// Transport failure talking to the gateway.
    #[error("http error: {0}")]
    Http(#[from] FetchError),

    /// Malformed gateway response.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
