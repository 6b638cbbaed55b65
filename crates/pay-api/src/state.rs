//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the single payment gateway instance and the server configuration.

use anyhow::Context;
use axum::http::HeaderValue;
use pay_core::SharedGateway;
use pay_razorpay::RazorpayGateway;
use std::sync::Arc;
use tracing::info;

/// Origins allowed to call the API with credentials
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:8080",
    "http://localhost:5173",
    "https://www.slumberpanda.com",
];

/// Request body limit, matching the storefront's historical JSON parser limit
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// CORS allow-list
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes
    pub body_limit: usize,
}

impl AppConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|list| parse_origin_list(&list))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.allowed_origins),
            body_limit: defaults.body_limit,
        }
    }

    /// Address string to bind to (host may be a name)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Allowed origins as header values.
    ///
    /// Fails on the first origin that is not a valid header value.
    pub fn origin_header_values(&self) -> anyhow::Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin: {:?}", origin))
            })
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            environment: "development".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn parse_origin_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway, built once at start-up
    pub gateway: SharedGateway,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState with the Razorpay gateway from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        config.origin_header_values()?;

        let gateway = RazorpayGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;

        info!(
            "Razorpay key {} ({} mode)",
            gateway.config().key_id,
            if gateway.config().is_live_mode() { "live" } else { "test" }
        );

        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create state around an already-built gateway
    pub fn with_gateway(config: AppConfig, gateway: SharedGateway) -> Self {
        Self {
            gateway,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.allowed_origins.len(), 3);
        assert!(!config.is_production());
    }

    #[test]
    fn test_bind_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_origin_list() {
        let origins = parse_origin_list(" https://a.example/, ,http://localhost:3000 ");
        assert_eq!(origins, vec!["https://a.example", "http://localhost:3000"]);
    }

    #[test]
    fn test_origin_header_values() {
        assert_eq!(AppConfig::default().origin_header_values().unwrap().len(), 3);

        let config = AppConfig {
            allowed_origins: vec!["https://ok.example".into(), "bad\norigin".into()],
            ..AppConfig::default()
        };
        assert!(config.origin_header_values().is_err());
    }
}
