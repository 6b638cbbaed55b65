//! # Payment Confirmation
//!
//! Identifiers and signature the storefront relays after checkout completes.

use serde::{Deserialize, Serialize};

/// Separator between order id and payment id in the signed payload
pub const SIGNED_PAYLOAD_SEPARATOR: char = '|';

/// A payment-completion callback relayed by the storefront
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Gateway order id
    pub order_id: String,
    /// Gateway payment id
    pub payment_id: String,
    /// Hex signature issued by the gateway
    pub signature: String,
}

impl PaymentConfirmation {
    pub fn new(
        order_id: impl Into<String>,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
            signature: signature.into(),
        }
    }

    /// The message the gateway signs: `order_id|payment_id`
    pub fn signed_payload(&self) -> String {
        format!(
            "{}{}{}",
            self.order_id, SIGNED_PAYLOAD_SEPARATOR, self.payment_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_payload_order() {
        let confirmation = PaymentConfirmation::new("order_1", "pay_1", "sig");
        assert_eq!(confirmation.signed_payload(), "order_1|pay_1");
    }
}
