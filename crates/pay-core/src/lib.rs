//! # pay-core
//!
//! Core types and traits for the Slumber Panda payment facade.
//!
//! This crate provides:
//! - `PaymentGateway` trait for implementing payment providers
//! - `OrderRequest` and `GatewayOrder` for order creation
//! - `PaymentConfirmation` for signature verification
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CustomerDetails, OrderRequest, PaymentGateway};
//!
//! // 499.00 INR becomes 49900 paise
//! let request = OrderRequest::new(499.0, None, Some(&customer))?;
//!
//! let order = gateway.create_order(&request).await?;
//! println!("created {}", order.id);
//! ```

pub mod error;
pub mod gateway;
pub mod order;
pub mod payment;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use gateway::{PaymentGateway, SharedGateway};
pub use order::{
    generate_receipt, normalize_currency, to_minor_units, CustomerDetails, GatewayOrder,
    OrderNotes, OrderRequest, DEFAULT_CURRENCY,
};
pub use payment::PaymentConfirmation;
