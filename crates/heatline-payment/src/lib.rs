//! Payment initiation for Heatline.
//!
//! The storefront only ever initiates a payment and redirects the
//! customer to the gateway's confirmation page; everything else
//! (capture, webhooks, refunds) belongs to the gateway itself. The
//! integration is therefore one narrow trait, [`PaymentGateway`], with a
//! real YooKassa-style implementation and a mock for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use heatline_payment::{MockGateway, PaymentGateway, PaymentRequest};
//!
//! let gateway = MockGateway::new();
//! let payment = gateway.create(&PaymentRequest::new(100.0))?;
//! assert_eq!(payment.amount.value, "100.00");
//! ```

mod client;
mod error;
mod gateway;
mod types;

pub use client::{FetchError, HttpClient, Method, Response};
pub use error::PaymentError;
pub use gateway::{CheckoutGateway, GatewayConfig, MockGateway, PaymentGateway};
pub use types::{Confirmation, Payment, PaymentAmount, PaymentRequest, PaymentStatus};
