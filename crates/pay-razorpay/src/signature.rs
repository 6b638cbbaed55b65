//! # Payment Signature Verification
//!
//! Razorpay signs a completed checkout with
//! `HMAC_SHA256(key_secret, order_id + "|" + payment_id)`, hex-encoded.
//! Verification recomputes the digest and compares it in constant time.

use hmac::{Hmac, Mac};
use pay_core::{PaymentConfirmation, PaymentError, PaymentResult};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the lowercase hex signature for an order/payment pair.
///
/// An empty secret is a configuration error; there is no fallback key.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> PaymentResult<String> {
    if secret.is_empty() {
        return Err(PaymentError::Configuration(
            "payment signature secret is not configured".to_string(),
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::Internal(format!("invalid HMAC key: {}", e)))?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a caller-supplied signature against the recomputed one.
///
/// The supplied value must equal the lowercase hex digest byte for byte.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> PaymentResult<bool> {
    let expected = payment_signature(secret, order_id, payment_id)?;
    Ok(expected.as_bytes().ct_eq(signature.as_bytes()).into())
}

/// Verifies payment confirmations with a fixed secret
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn sign(&self, order_id: &str, payment_id: &str) -> PaymentResult<String> {
        payment_signature(&self.secret, order_id, payment_id)
    }

    pub fn verify(&self, confirmation: &PaymentConfirmation) -> PaymentResult<bool> {
        verify_payment_signature(
            &self.secret,
            &confirmation.order_id,
            &confirmation.payment_id,
            &confirmation.signature,
        )
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("configured", &!self.secret.is_empty())
            .finish()
    }
}
