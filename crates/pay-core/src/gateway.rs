//! # Payment Gateway Trait
//!
//! Seam between the HTTP layer and a concrete payment provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PaymentGateway (trait)                    │
//! │  ├── create_order()                                         │
//! │  ├── verify_payment()                                       │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │RazorpayGateway│
//!                    └───────────────┘
//! ```
//!
//! The API holds exactly one gateway, built at start-up and shared
//! through [`SharedGateway`].

use crate::error::PaymentResult;
use crate::order::{GatewayOrder, OrderRequest};
use crate::payment::PaymentConfirmation;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order with the provider.
    ///
    /// # Arguments
    /// * `request` - Normalized order request (amount already in minor units)
    ///
    /// # Returns
    /// The order as recorded by the provider, including its id.
    async fn create_order(&self, request: &OrderRequest) -> PaymentResult<GatewayOrder>;

    /// Check a payment-completion signature.
    ///
    /// Returns `Ok(false)` on mismatch. Errors mean the check could not be
    /// performed at all (e.g. no secret configured) and must be treated as
    /// a rejection.
    fn verify_payment(&self, confirmation: &PaymentConfirmation) -> PaymentResult<bool>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type SharedGateway = Arc<dyn PaymentGateway>;
