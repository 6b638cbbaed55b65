//! # Razorpay Orders
//!
//! Implementation of the Razorpay Orders API.
//! An order must exist before the storefront opens Razorpay Checkout.

use crate::config::RazorpayConfig;
use crate::signature::SignatureVerifier;
use async_trait::async_trait;
use pay_core::{
    GatewayOrder, OrderNotes, OrderRequest, PaymentConfirmation, PaymentError, PaymentGateway,
    PaymentResult,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "razorpay";

/// Razorpay gateway
///
/// Creates orders over the REST API and verifies checkout signatures
/// with the same key secret.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    client: Client,
    verifier: SignatureVerifier,
}

impl RazorpayGateway {
    /// Create a new Razorpay gateway
    pub fn new(config: RazorpayConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let verifier = SignatureVerifier::new(config.key_secret.clone());

        Ok(Self {
            config,
            client,
            verifier,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = RazorpayConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &RazorpayConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    #[instrument(skip(self, request), fields(receipt = %request.receipt, amount = request.amount))]
    async fn create_order(&self, request: &OrderRequest) -> PaymentResult<GatewayOrder> {
        let body = RazorpayOrderRequest {
            amount: request.amount,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: &request.notes,
        };

        debug!(
            "Creating Razorpay order: amount={}, currency={}",
            request.amount, request.currency
        );

        let url = format!("{}/v1/orders", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, body);

            // Parse Razorpay error
            if let Ok(error_response) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                error!(
                    code = ?error_response.error.code,
                    field = ?error_response.error.field,
                    "Razorpay rejected order"
                );
                return Err(PaymentError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: error_response.error.description,
                });
            }

            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let order: GatewayOrder = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Razorpay response: {}", e))
        })?;

        info!(
            "Created Razorpay order: id={}, amount={}, status={}",
            order.id, order.amount, order.status
        );

        Ok(order)
    }

    fn verify_payment(&self, confirmation: &PaymentConfirmation) -> PaymentResult<bool> {
        self.verifier.verify(confirmation)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct RazorpayOrderRequest<'a> {
    amount: u64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a OrderNotes,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: RazorpayError,
}

#[derive(Debug, Deserialize)]
struct RazorpayError {
    #[serde(default)]
    code: Option<String>,
    description: String,
    #[serde(default)]
    field: Option<String>,
}
