//! Payment gateway implementations.

use crate::client::HttpClient;
use crate::error::PaymentError;
use crate::types::{Confirmation, Payment, PaymentAmount, PaymentRequest, PaymentStatus};
use serde::Serialize;

/// The narrow interface the storefront holds on the payment provider.
pub trait PaymentGateway {
    /// Initiate a payment; the returned payment starts out `pending`.
    fn create(&self, request: &PaymentRequest) -> Result<Payment, PaymentError>;
}

/// Gateway connection settings.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base API URL.
    pub api_url: String,
    /// Shop identifier for basic auth.
    pub shop_id: String,
    /// Secret key for basic auth.
    pub secret_key: String,
    /// Where the customer lands after confirming.
    pub return_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.yookassa.ru/v3".to_string(),
            shop_id: String::new(),
            secret_key: String::new(),
            return_url: "https://shop.example/order".to_string(),
        }
    }
}

/// Wire shape of the gateway's create-payment call.
#[derive(Debug, Serialize)]
struct CreatePaymentBody {
    amount: PaymentAmount,
    capture: bool,
    confirmation: Confirmation,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// YooKassa-style gateway over outbound HTTP.
#[derive(Debug, Clone)]
pub struct CheckoutGateway {
    config: GatewayConfig,
    client: HttpClient,
}

impl CheckoutGateway {
    /// Create a gateway with the given settings.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: HttpClient::new(),
        }
    }

    fn request_body(&self, request: &PaymentRequest) -> CreatePaymentBody {
        CreatePaymentBody {
            amount: PaymentAmount::rub(request.amount),
            capture: true,
            confirmation: Confirmation::redirect(self.config.return_url.clone()),
            description: request.description.clone(),
        }
    }
}

impl PaymentGateway for CheckoutGateway {
    fn create(&self, request: &PaymentRequest) -> Result<Payment, PaymentError> {
        if request.amount <= 0.0 {
            return Err(PaymentError::InvalidAmount(request.amount));
        }

        let response = self
            .client
            .post(format!("{}/payments", self.config.api_url))
            .basic_auth(&self.config.shop_id, Some(&self.config.secret_key))
            .header("Idempotence-Key", generate_idempotence_key())
            .json(&self.request_body(request))?
            .send()?;

        if !response.is_success() {
            return Err(PaymentError::Gateway(format!(
                "create payment failed with status {}",
                response.status()
            )));
        }

        response.json::<Payment>().map_err(PaymentError::from)
    }
}

/// Mock gateway for tests: every payment comes back `pending`.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    return_url: String,
}

impl MockGateway {
    /// Create a mock gateway.
    pub fn new() -> Self {
        Self {
            return_url: "https://shop.example/order".to_string(),
        }
    }
}

impl PaymentGateway for MockGateway {
    fn create(&self, request: &PaymentRequest) -> Result<Payment, PaymentError> {
        if request.amount <= 0.0 {
            return Err(PaymentError::InvalidAmount(request.amount));
        }

        Ok(Payment {
            id: generate_idempotence_key(),
            status: PaymentStatus::Pending,
            amount: PaymentAmount::rub(request.amount),
            confirmation: Some(Confirmation {
                kind: "redirect".to_string(),
                return_url: None,
                confirmation_url: Some(format!("{}/confirm", self.return_url)),
            }),
            description: request.description.clone(),
        })
    }
}

/// Generate a unique key using timestamp and an atomic counter.
fn generate_idempotence_key() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{:x}-{:x}", timestamp, counter)
}
