//! # Razorpay Configuration
//!
//! Configuration management for Razorpay integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Razorpay API configuration
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Key id (rzp_test_... or rzp_live_...)
    pub key_id: String,

    /// Key secret. Authenticates API calls and signs payment callbacks.
    pub key_secret: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Timeout for a single API call
    pub timeout: Duration,
}

impl RazorpayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `RAZORPAY_KEY_ID`
    /// - `RAZORPAY_KEY_SECRET`
    ///
    /// Optional:
    /// - `RAZORPAY_API_BASE_URL`
    pub fn from_env() -> Result<Self, PaymentError> {
        let key_id = env::var("RAZORPAY_KEY_ID").map_err(|_| {
            PaymentError::Configuration("RAZORPAY_KEY_ID not set".to_string())
        })?;

        let key_secret = env::var("RAZORPAY_KEY_SECRET").map_err(|_| {
            PaymentError::Configuration("RAZORPAY_KEY_SECRET not set".to_string())
        })?;

        let config = Self::new(key_id, key_secret);
        config.validate()?;

        match env::var("RAZORPAY_API_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => Ok(config.with_api_base_url(url.trim())),
            _ => Ok(config),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Validate key formats
    pub fn validate(&self) -> Result<(), PaymentError> {
        if !self.is_test_mode() && !self.is_live_mode() {
            return Err(PaymentError::Configuration(
                "RAZORPAY_KEY_ID must start with rzp_test_ or rzp_live_".to_string(),
            ));
        }

        if self.key_secret.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "RAZORPAY_KEY_SECRET must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.key_id.starts_with("rzp_live_")
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        // Valid test keys
        let config = RazorpayConfig::new("rzp_test_abc123", "secret");
        assert!(config.validate().is_ok());
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        // Valid live keys
        let config = RazorpayConfig::new("rzp_live_abc123", "secret");
        assert!(config.validate().is_ok());
        assert!(!config.is_test_mode());
        assert!(config.is_live_mode());

        assert!(RazorpayConfig::new("sk_test_abc123", "secret").validate().is_err());
        assert!(RazorpayConfig::new("rzp_test_abc123", " ").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = RazorpayConfig::new("rzp_test_abc123", "very-secret-value");
        let rendered = format!("{:?}", config);

        assert!(rendered.contains("rzp_test_abc123"));
        assert!(!rendered.contains("very-secret-value"));
    }

    #[test]
    fn test_api_base_url_trailing_slash() {
        let config = RazorpayConfig::new("rzp_test_abc123", "secret")
            .with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
    }
}
