//! Payment types.
//!
//! Shapes mirror the gateway's JSON: amounts are decimal strings with the
//! currency alongside, statuses are lowercase snake_case.

use serde::{Deserialize, Serialize};

/// Payment lifecycle status as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, awaiting customer confirmation.
    #[default]
    Pending,
    /// Confirmed by the customer, awaiting capture.
    WaitingForCapture,
    /// Captured.
    Succeeded,
    /// Canceled by the customer or the gateway.
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::WaitingForCapture => "waiting_for_capture",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Canceled => "canceled",
        }
    }

    /// Check if the payment is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Canceled)
    }
}

/// A monetary amount on the wire: decimal string plus currency code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentAmount {
    /// Decimal amount with two places, e.g. `"100.00"`.
    pub value: String,
    /// ISO currency code.
    pub currency: String,
}

impl PaymentAmount {
    /// Build a rouble amount from a numeric value.
    pub fn rub(amount: f64) -> Self {
        Self {
            value: format!("{amount:.2}"),
            currency: "RUB".to_string(),
        }
    }
}

/// Redirect confirmation details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Confirmation {
    /// Confirmation flow kind; this integration always uses `redirect`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Where to send the customer after confirmation (request side).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Where to send the customer to confirm (response side).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,
}

impl Confirmation {
    /// A redirect confirmation pointing back at the shop.
    pub fn redirect(return_url: impl Into<String>) -> Self {
        Self {
            kind: "redirect".to_string(),
            return_url: Some(return_url.into()),
            confirmation_url: None,
        }
    }
}

/// A payment as reported by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    /// Gateway-assigned payment id.
    pub id: String,
    /// Current status.
    pub status: PaymentStatus,
    /// The amount being charged.
    pub amount: PaymentAmount,
    /// Confirmation details, when the flow requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    /// Free-text order description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// What the storefront asks the gateway to charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRequest {
    /// Amount in roubles.
    pub amount: f64,
    /// Optional order description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PaymentRequest {
    /// Create a request for the given amount.
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            description: None,
        }
    }

    /// Attach an order description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
