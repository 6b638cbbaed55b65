//! # Payment Error Types
//!
//! Typed error handling for the payment facade.
//! All gateway operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Amount is missing, non-finite or not positive
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// The human-readable detail without the category prefix.
    ///
    /// This is what gets passed through to API callers.
    pub fn detail(&self) -> &str {
        match self {
            PaymentError::Configuration(msg)
            | PaymentError::NetworkError(msg)
            | PaymentError::Internal(msg)
            | PaymentError::Serialization(msg) => msg,
            PaymentError::InvalidAmount { message } => message,
            PaymentError::ProviderError { message, .. } => message,
        }
    }

    /// Returns true if the failure originated outside this process
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            PaymentError::ProviderError { .. } | PaymentError::NetworkError(_)
        )
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors() {
        assert!(PaymentError::NetworkError("timeout".into()).is_upstream());
        assert!(PaymentError::ProviderError {
            provider: "razorpay".into(),
            message: "bad request".into()
        }
        .is_upstream());
        assert!(!PaymentError::Configuration("no secret".into()).is_upstream());
    }

    #[test]
    fn test_detail_strips_prefix() {
        let err = PaymentError::ProviderError {
            provider: "razorpay".into(),
            message: "The amount must be atleast INR 1.00".into(),
        };
        assert_eq!(err.detail(), "The amount must be atleast INR 1.00");
        assert_eq!(
            err.to_string(),
            "Provider error [razorpay]: The amount must be atleast INR 1.00"
        );
    }
}
