//! # pay-api
//!
//! HTTP API layer for the Slumber Panda payment facade.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Order creation through the payment gateway
//! - Checkout signature verification
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Health check |
//! | GET | `/health` | Health check |
//! | POST | `/api/create-order` | Create gateway order |
//! | POST | `/api/verify-payment` | Verify payment signature |

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
