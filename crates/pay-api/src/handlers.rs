//! # Request Handlers
//!
//! Axum request handlers for the payment API.
//! Create an order with the gateway, then verify the checkout signature
//! the storefront relays back.

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, State},
    Json,
};
use chrono::{SecondsFormat, Utc};
use pay_core::{CustomerDetails, OrderRequest, PaymentConfirmation, PaymentError};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create-order input, pulled leniently out of the request body
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderInput {
    /// Major-unit amount (rupees)
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub customer: Option<CustomerDetails>,
}

impl CreateOrderInput {
    /// Read `amount`, `currency` and `customerDetails`.
    ///
    /// `amount` may be a number or a numeric string. Values of the wrong
    /// type are treated as absent.
    pub fn from_body(body: &Value) -> Self {
        let amount = match body.get("amount") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        let currency = body
            .get("currency")
            .and_then(Value::as_str)
            .map(String::from);

        let customer = body
            .get("customerDetails")
            .filter(|v| v.is_object())
            .map(|details| {
                let field = |key: &str| details.get(key).and_then(Value::as_str).map(String::from);
                CustomerDetails {
                    name: field("name"),
                    email: field("email"),
                    phone: field("phone"),
                }
            });

        Self {
            amount,
            currency,
            customer,
        }
    }

    /// Normalize into a gateway request, or reject the amount
    pub fn into_order_request(self) -> Result<OrderRequest, ApiError> {
        let amount = self.amount.ok_or(ApiError::InvalidAmount)?;

        OrderRequest::new(amount, self.currency.as_deref(), self.customer.as_ref()).map_err(
            |e| match e {
                PaymentError::InvalidAmount { .. } => ApiError::InvalidAmount,
                other => ApiError::OrderCreation(other),
            },
        )
    }
}

/// Create order response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: String,
    /// Minor units, as recorded by the gateway
    pub amount: u64,
    pub currency: String,
    pub receipt: Option<String>,
}

/// Read the three verification fields; each must be a non-empty string
pub fn confirmation_from_body(body: &Value) -> Result<PaymentConfirmation, ApiError> {
    let field = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    match (
        field("razorpay_order_id"),
        field("razorpay_payment_id"),
        field("razorpay_signature"),
    ) {
        (Some(order_id), Some(payment_id), Some(signature)) => {
            Ok(PaymentConfirmation::new(order_id, payment_id, signature))
        }
        _ => Err(ApiError::MissingVerificationFields),
    }
}

/// Verify payment response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub verified: bool,
    pub payment_id: String,
    pub order_id: String,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Slumber Panda API Server is running!",
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Create a gateway order
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let request = CreateOrderInput::from_body(&body).into_order_request()?;

    let order = state
        .gateway
        .create_order(&request)
        .await
        .map_err(ApiError::OrderCreation)?;

    info!("Order created: {}", order.id);

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        receipt: order.receipt,
    }))
}

/// Verify a checkout signature
#[instrument(skip_all)]
pub async fn verify_payment(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    info!("Payment verification request received");

    let confirmation = confirmation_from_body(&body)?;

    let authentic = state
        .gateway
        .verify_payment(&confirmation)
        .map_err(ApiError::Verification)?;

    if !authentic {
        warn!("Payment verification failed: {}", confirmation.payment_id);
        return Err(ApiError::VerificationFailed);
    }

    info!("Payment verified successfully: {}", confirmation.payment_id);

    Ok(Json(VerifyPaymentResponse {
        success: true,
        verified: true,
        payment_id: confirmation.payment_id,
        order_id: confirmation.order_id,
        message: "Payment verified successfully".to_string(),
    }))
}

/// Fallback for unknown paths and unsupported methods.
///
/// The body is still parsed, so a malformed JSON body is rejected with 400
/// before the 404 is reported.
pub async fn not_found(OriginalUri(uri): OriginalUri, _body: JsonBody) -> ApiError {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    ApiError::NotFound(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_parsing() {
        let input = CreateOrderInput::from_body(&json!({ "amount": 499.5 }));
        assert_eq!(input.amount, Some(499.5));

        let input = CreateOrderInput::from_body(&json!({ "amount": " 250 " }));
        assert_eq!(input.amount, Some(250.0));

        for body in [
            json!({}),
            json!({ "amount": null }),
            json!({ "amount": true }),
            json!({ "amount": "abc" }),
            json!({ "amount": [1] }),
        ] {
            assert_eq!(CreateOrderInput::from_body(&body).amount, None, "{}", body);
        }
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        for body in [
            json!({}),
            json!({ "amount": 0 }),
            json!({ "amount": -10 }),
            json!({ "amount": "NaN" }),
        ] {
            let result = CreateOrderInput::from_body(&body).into_order_request();
            assert!(matches!(result, Err(ApiError::InvalidAmount)), "{}", body);
        }
    }

    #[test]
    fn test_customer_details() {
        let input = CreateOrderInput::from_body(&json!({
            "amount": 10,
            "currency": "usd",
            "customerDetails": { "name": "Asha", "email": 42 }
        }));

        let customer = input.customer.clone().unwrap();
        assert_eq!(customer.name.as_deref(), Some("Asha"));
        assert_eq!(customer.email, None);
        assert_eq!(customer.phone, None);

        let request = input.into_order_request().unwrap();
        assert_eq!(request.amount, 1000);
        assert_eq!(request.currency, "USD");
        assert_eq!(request.notes.customer_name, "Asha");
        assert_eq!(request.notes.customer_email, "");
    }

    #[test]
    fn test_confirmation_from_body() {
        let confirmation = confirmation_from_body(&json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "abc"
        }))
        .unwrap();
        assert_eq!(confirmation.signed_payload(), "order_1|pay_1");

        let missing = confirmation_from_body(&json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "",
            "razorpay_signature": "abc"
        }));
        assert!(matches!(missing, Err(ApiError::MissingVerificationFields)));

        let wrong_type = confirmation_from_body(&json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": 7,
            "razorpay_signature": "abc"
        }));
        assert!(matches!(wrong_type, Err(ApiError::MissingVerificationFields)));
    }
}
