//! # API Errors
//!
//! Every failure the HTTP layer can report, and the flat JSON body each one
//! renders to. Client mistakes are 400, gateway and internal failures 500,
//! unknown routes 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pay_core::PaymentError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

pub const INVALID_AMOUNT: &str = "Valid amount is required";
pub const MISSING_VERIFICATION_FIELDS: &str = "Missing required payment verification data";
pub const MISSING_VERIFICATION_FIELDS_MESSAGE: &str =
    "razorpay_order_id, razorpay_payment_id, and razorpay_signature are required";
pub const VERIFICATION_FAILED: &str = "Payment verification failed";
pub const INVALID_SIGNATURE_MESSAGE: &str = "Invalid payment signature";
pub const INVALID_JSON: &str = "Invalid JSON format";
pub const INVALID_JSON_MESSAGE: &str = "Request body contains malformed JSON";

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Amount missing, non-numeric or not positive
    #[error("Valid amount is required")]
    InvalidAmount,

    /// Gateway refused or failed to create the order
    #[error("Failed to create order: {0}")]
    OrderCreation(#[source] PaymentError),

    #[error("Missing required payment verification data")]
    MissingVerificationFields,

    /// Recomputed signature did not match
    #[error("Payment verification failed")]
    VerificationFailed,

    /// Verification could not run (e.g. no secret configured)
    #[error("Payment verification error: {0}")]
    Verification(#[source] PaymentError),

    /// Body declared as JSON but unparseable; holds the parser detail
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    /// No route for this path/method; holds the original path and query
    #[error("Route {0} not found")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Flat JSON error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// A `{success:false, error}` body
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            verified: None,
            error: error.into(),
            message: None,
        }
    }

    /// A bare `{error}` body
    pub fn bare(error: impl Into<String>) -> Self {
        Self {
            success: None,
            ..Self::new(error)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Mark as a failed verification (`verified:false`)
    pub fn unverified(mut self) -> Self {
        self.verified = Some(false);
        self
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidAmount
            | ApiError::MissingVerificationFields
            | ApiError::VerificationFailed
            | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::OrderCreation(_) | ApiError::Verification(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidAmount => ErrorResponse::bare(INVALID_AMOUNT),
            ApiError::OrderCreation(e) => {
                ErrorResponse::new("Failed to create order").with_message(e.detail())
            }
            ApiError::MissingVerificationFields => ErrorResponse::new(MISSING_VERIFICATION_FIELDS)
                .unverified()
                .with_message(MISSING_VERIFICATION_FIELDS_MESSAGE),
            ApiError::VerificationFailed => ErrorResponse::new(VERIFICATION_FAILED)
                .unverified()
                .with_message(INVALID_SIGNATURE_MESSAGE),
            ApiError::Verification(e) => ErrorResponse::new("Payment verification error")
                .unverified()
                .with_message(e.detail()),
            ApiError::InvalidJson(_) => {
                ErrorResponse::new(INVALID_JSON).with_message(INVALID_JSON_MESSAGE)
            }
            ApiError::NotFound(path) => ErrorResponse::new("Endpoint not found")
                .with_message(format!("Route {} not found", path)),
            ApiError::Internal(detail) => {
                ErrorResponse::new("Internal server error").with_message(detail.clone())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::OrderCreation(e) if e.is_upstream() => error!("Error creating order: {}", e),
            ApiError::OrderCreation(e) => error!("Order creation failed before gateway: {}", e),
            ApiError::Verification(e) => error!("Error verifying payment: {}", e),
            ApiError::Internal(detail) => error!("Unhandled error: {}", detail),
            ApiError::InvalidJson(detail) => warn!("JSON parse error: {}", detail),
            other => warn!("{}", other),
        }

        (status, Json(self.body())).into_response()
    }
}
