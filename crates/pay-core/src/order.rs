//! # Order Types
//!
//! Order requests sent to the gateway and the orders it hands back.
//! Amounts travel to the gateway in minor units (paise for INR).

use crate::error::{PaymentError, PaymentResult};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency used when the caller does not name one
pub const DEFAULT_CURRENCY: &str = "INR";

/// Minor units per major unit; the gateway always expects `amount × 100`
pub const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// Convert a major-unit amount into the gateway's integer minor units.
///
/// Rejects non-finite and non-positive amounts. Rounds half away from zero,
/// so `0.015` becomes `2` and `0.004` becomes `0`.
pub fn to_minor_units(amount: f64) -> PaymentResult<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::InvalidAmount {
            message: format!("amount must be a positive number, got {}", amount),
        });
    }

    let minor = (amount * MINOR_UNITS_PER_MAJOR).round();
    if minor >= u64::MAX as f64 {
        return Err(PaymentError::InvalidAmount {
            message: format!("amount {} is too large", amount),
        });
    }

    Ok(minor as u64)
}

/// Trim and upper-case a currency code, falling back to [`DEFAULT_CURRENCY`]
pub fn normalize_currency(currency: Option<&str>) -> String {
    match currency.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_uppercase(),
        _ => DEFAULT_CURRENCY.to_string(),
    }
}

/// Length of the random receipt suffix
const RECEIPT_SUFFIX_LEN: usize = 9;

/// Generate a receipt reference: `order_<unix millis>_<9 random chars>`.
///
/// The suffix is lowercase base-36 (`0-9a-z`) drawn from a v4 UUID.
pub fn generate_receipt() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let suffix: String = (0..RECEIPT_SUFFIX_LEN)
        .map(|_| {
            let digit = (bits % 36) as u32;
            bits /= 36;
            char::from_digit(digit, 36).unwrap_or('0')
        })
        .collect();

    format!("order_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Customer details supplied by the storefront (all optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Notes attached to the gateway order.
///
/// Missing customer fields are sent as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotes {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// RFC 3339 creation time
    pub created_at: String,
}

impl OrderNotes {
    pub fn from_customer(customer: Option<&CustomerDetails>) -> Self {
        let customer = customer.cloned().unwrap_or_default();

        Self {
            customer_name: customer.name.unwrap_or_default(),
            customer_email: customer.email.unwrap_or_default(),
            customer_phone: customer.phone.unwrap_or_default(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// A normalized order-creation request, ready for the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Amount in minor units
    pub amount: u64,

    /// ISO 4217 code, upper-case
    pub currency: String,

    /// Our receipt reference
    pub receipt: String,

    pub notes: OrderNotes,
}

impl OrderRequest {
    /// Build a request from a major-unit amount.
    ///
    /// Fails with [`PaymentError::InvalidAmount`] before anything is sent.
    pub fn new(
        amount: f64,
        currency: Option<&str>,
        customer: Option<&CustomerDetails>,
    ) -> PaymentResult<Self> {
        Ok(Self {
            amount: to_minor_units(amount)?,
            currency: normalize_currency(currency),
            receipt: generate_receipt(),
            notes: OrderNotes::from_customer(customer),
        })
    }

    /// Builder: set receipt reference
    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = receipt.into();
        self
    }
}

/// An order as created by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order id (e.g. `order_DBJOWzybf0sJbb`)
    pub id: String,

    /// Amount in minor units, as the gateway recorded it
    pub amount: u64,

    pub currency: String,

    #[serde(default)]
    pub receipt: Option<String>,

    /// Gateway status (`created`, `attempted`, `paid`)
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_rounding() {
        assert_eq!(to_minor_units(499.0).unwrap(), 49900);
        assert_eq!(to_minor_units(10.99).unwrap(), 1099);
        assert_eq!(to_minor_units(0.015).unwrap(), 2);
        assert_eq!(to_minor_units(0.004).unwrap(), 0);
        assert_eq!(to_minor_units(1234.5678).unwrap(), 123457);
    }

    #[test]
    fn test_minor_units_rejects_non_positive() {
        assert!(matches!(
            to_minor_units(0.0),
            Err(PaymentError::InvalidAmount { .. })
        ));
        assert!(to_minor_units(-5.0).is_err());
        assert!(to_minor_units(f64::NAN).is_err());
        assert!(to_minor_units(f64::INFINITY).is_err());
        assert!(to_minor_units(1e300).is_err());
    }

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize_currency(None), "INR");
        assert_eq!(normalize_currency(Some("  ")), "INR");
        assert_eq!(normalize_currency(Some("usd")), "USD");
        assert_eq!(normalize_currency(Some(" INR ")), "INR");
    }

    #[test]
    fn test_receipt_format() {
        let receipt = generate_receipt();
        let parts: Vec<&str> = receipt.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "order");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(receipt.len() <= 40);
        assert_ne!(receipt, generate_receipt());
    }

    #[test]
    fn test_notes_default_to_empty() {
        let notes = OrderNotes::from_customer(None);
        assert_eq!(notes.customer_name, "");
        assert_eq!(notes.customer_email, "");
        assert_eq!(notes.customer_phone, "");
        assert!(chrono::DateTime::parse_from_rfc3339(&notes.created_at).is_ok());

        let customer = CustomerDetails {
            name: Some("Asha".into()),
            email: None,
            phone: Some("+919800000000".into()),
        };
        let notes = OrderNotes::from_customer(Some(&customer));
        assert_eq!(notes.customer_name, "Asha");
        assert_eq!(notes.customer_email, "");
        assert_eq!(notes.customer_phone, "+919800000000");
    }

    #[test]
    fn test_order_request() {
        let request = OrderRequest::new(25.5, Some("inr"), None)
            .unwrap()
            .with_receipt("order_test");

        assert_eq!(request.amount, 2550);
        assert_eq!(request.currency, "INR");
        assert_eq!(request.receipt, "order_test");
        assert!(OrderRequest::new(-1.0, None, None).is_err());
    }

    #[test]
    fn test_gateway_order_deserialize() {
        let order: GatewayOrder = serde_json::from_str(
            r#"{
                "id": "order_DBJOWzybf0sJbb",
                "entity": "order",
                "amount": 50000,
                "amount_paid": 0,
                "amount_due": 50000,
                "currency": "INR",
                "receipt": "receipt_1",
                "status": "created",
                "attempts": 0,
                "notes": [],
                "created_at": 1566986570
            }"#,
        )
        .unwrap();

        assert_eq!(order.id, "order_DBJOWzybf0sJbb");
        assert_eq!(order.amount, 50000);
        assert_eq!(order.receipt.as_deref(), Some("receipt_1"));
        assert_eq!(order.status, "created");
    }
}
