//! # Payload Projector
//!
//! Pure projection of the session into the JSON snapshot carried by the QR
//! code.
//!
//! ## Wire Shape
//! ```json
//! {
//!   "user": { "name": "Ada", "email": null, "phone": null },
//!   "items": [
//!     { "id": "A-001", "name": "iPhone 15", "price": 999, "quantity": 1 }
//!   ],
//!   "total": 999,
//!   "generatedAt": "2025-01-01T12:00:00.000Z"
//! }
//! ```
//!
//! ## Determinism
//! [`project`] is a pure function of its three inputs. The timestamp is one
//! of them, so projecting unchanged state twice with the current time yields
//! two payloads that differ only in `generatedAt`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{non_empty, CartLine, CustomerInfo};

// =============================================================================
// Payload Types
// =============================================================================

/// Customer fields as they appear in the payload; absent fields are `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PayloadUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&CustomerInfo> for PayloadUser {
    fn from(customer: &CustomerInfo) -> Self {
        PayloadUser {
            name: non_empty(&customer.name),
            email: non_empty(&customer.email),
            phone: non_empty(&customer.phone),
        }
    }
}

/// The snapshot encoded into the QR symbol.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Payload {
    pub user: PayloadUser,

    /// Lines in cart order.
    pub items: Vec<CartLine>,

    /// Sum of `price × quantity` over `items`.
    #[ts(type = "number")]
    pub total: Money,

    /// When this projection was made (ISO-8601, UTC, milliseconds).
    #[serde(serialize_with = "serialize_timestamp")]
    #[ts(type = "string")]
    pub generated_at: DateTime<Utc>,
}

impl Payload {
    /// Serializes the payload as pretty JSON with a 2-space indent.
    ///
    /// This exact string is what the QR code encodes and what gets copied to
    /// the clipboard.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_timestamp<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// =============================================================================
// Projection
// =============================================================================

/// Projects customer fields and cart lines into a payload stamped with `now`.
///
/// ## Data Flow
/// ```text
/// CustomerInfo ──► "" → null ──────────────┐
///                                          ├──► Payload ──► to_json()
/// &[CartLine] ──► items + Σ price×qty ─────┤
///                                          │
/// now ─────────────────────────────────────┘
/// ```
pub fn project(customer: &CustomerInfo, lines: &[CartLine], now: DateTime<Utc>) -> Payload {
    Payload {
        user: PayloadUser::from(customer),
        items: lines.to_vec(),
        total: lines.iter().map(CartLine::subtotal).sum(),
        generated_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::session::Session;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_empty_session_projection() {
        let payload = project(&CustomerInfo::default(), &[], fixed_time());

        assert!(payload.items.is_empty());
        assert!(payload.total.is_zero());
        assert_eq!(payload.user, PayloadUser::default());

        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "user": { "name": null, "email": null, "phone": null },
                "items": [],
                "total": 0,
                "generatedAt": "2025-01-02T03:04:05.000Z"
            })
        );
    }

    #[test]
    fn test_pretty_json_layout() {
        let catalog = Catalog::sample();
        let mut session = Session::new();
        let _ = session.add(catalog.find("A-001").unwrap());
        let _ = session.add(catalog.find("S-002").unwrap());
        let _ = session.add(catalog.find("S-002").unwrap());
        let _ = session.set_name("Ada");

        let json = session.project(fixed_time()).to_json().unwrap();

        let expected = r#"{
  "user": {
    "name": "Ada",
    "email": null,
    "phone": null
  },
  "items": [
    {
      "id": "A-001",
      "name": "iPhone 15",
      "price": 999,
      "quantity": 1
    },
    {
      "id": "S-002",
      "name": "Galaxy A54",
      "price": 349,
      "quantity": 2
    }
  ],
  "total": 1697,
  "generatedAt": "2025-01-02T03:04:05.000Z"
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_fractional_prices_in_total() {
        let catalog = Catalog::sample();
        let mut session = Session::new();
        let _ = session.add(catalog.find("X-004").unwrap());
        let _ = session.set_price("X-004", Money::from_cents(1099));
        let _ = session.set_quantity("X-004", 3);

        let payload = session.project(fixed_time());
        assert_eq!(payload.total.cents(), 3297);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["total"], serde_json::json!(32.97));
        assert_eq!(value["items"][0]["price"], serde_json::json!(10.99));
    }

    #[test]
    fn test_timestamp_is_the_only_difference_between_renders() {
        let catalog = Catalog::sample();
        let mut session = Session::new();
        let _ = session.add(catalog.find("X-001").unwrap());

        let first = session.project(fixed_time());
        let second = session.project(fixed_time() + chrono::Duration::milliseconds(250));

        assert_ne!(first, second);
        assert_eq!(first.items, second.items);
        assert_eq!(first.total, second.total);
        assert_eq!(first.user, second.user);
        assert!(second.to_json().unwrap().contains("2025-01-02T03:04:05.250Z"));
    }
}
