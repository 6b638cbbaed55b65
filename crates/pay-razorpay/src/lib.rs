//! # pay-razorpay
//!
//! Razorpay gateway adapter for the Slumber Panda payment facade.
//!
//! 1. **RazorpayGateway** - Orders API client
//!    - Amount already in paise, receipt and notes attached
//!    - HTTP basic auth with key id and key secret
//!
//! 2. **Signature verification** - checkout completion callbacks
//!    - `HMAC_SHA256(key_secret, order_id|payment_id)`, hex
//!    - Constant-time comparison, no fallback secret
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_razorpay::RazorpayGateway;
//! use pay_core::{OrderRequest, PaymentConfirmation, PaymentGateway};
//!
//! let gateway = RazorpayGateway::from_env()?;
//!
//! let order = gateway.create_order(&OrderRequest::new(499.0, None, None)?).await?;
//!
//! // Later, when the storefront relays the checkout result:
//! let ok = gateway.verify_payment(&PaymentConfirmation::new(order_id, payment_id, signature))?;
//! ```

pub mod config;
pub mod orders;
pub mod signature;

// Re-exports
pub use config::RazorpayConfig;
pub use orders::RazorpayGateway;
pub use signature::{payment_signature, verify_payment_signature, SignatureVerifier};
