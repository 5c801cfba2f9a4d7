//! # Cart Commands
//!
//! Cart manipulation from user input.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payload  │────►│ Exported │       │
//! │  │  Cart    │     │          │     │ + QR     │     │ (copy /  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     │ download)│       │
//! │                        │                            └──────────┘       │
//! │                   add_to_cart                                          │
//! │                   update_quantity                                      │
//! │                   update_price                                         │
//! │                   remove_from_cart                                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_session ───────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity and price arrive as raw text. Text that does not parse is
//! dropped the same way the cart drops out-of-range values: the response
//! says `applied: false` and nothing else happens.

use serde::Serialize;
use tracing::debug;

use qrx_core::validation::{parse_price_input, parse_quantity_input};
use qrx_core::{Cart, CartLine, CoreError, IgnoreReason, Money, Mutation};
use qrx_export::SymbolRenderer;

use crate::error::ApiError;
use crate::state::SessionState;

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

/// Cart response including items, totals and the mutation outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,

    /// Whether this command changed the session.
    pub applied: bool,

    /// Set when the cart itself refused the edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<IgnoreReason>,

    /// Set when the refreshed payload could not be rendered as a QR symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_error: Option<String>,
}

impl CartResponse {
    pub(crate) fn from_state<R: SymbolRenderer>(
        state: &SessionState<R>,
        outcome: Option<Mutation>,
    ) -> Self {
        let cart = state.session().cart();
        let (applied, ignored) = match outcome {
            Some(Mutation::Applied) => (true, None),
            Some(Mutation::Ignored(reason)) => (false, Some(reason)),
            None => (false, None),
        };

        CartResponse {
            items: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
            applied,
            ignored,
            symbol_error: state.symbol_error().map(str::to_string),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart<R: SymbolRenderer>(state: &SessionState<R>) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from_state(state, None)
}

/// Adds one unit of a catalog product.
///
/// ## Behavior
/// - Product already in cart: quantity increases by 1
/// - Product not in cart: appended with the catalog price
/// - Unknown id: `NOT_FOUND`
pub fn add_to_cart<R: SymbolRenderer>(
    state: &mut SessionState<R>,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = state
        .catalog()
        .find(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    let outcome = state.apply(|s| s.add(product));
    Ok(CartResponse::from_state(state, Some(outcome)))
}

/// Sets a line's quantity from text input (empty means 1).
pub fn update_quantity<R: SymbolRenderer>(
    state: &mut SessionState<R>,
    product_id: &str,
    input: &str,
) -> CartResponse {
    debug!(product_id = %product_id, input = %input, "update_quantity command");

    match parse_quantity_input(input) {
        Ok(quantity) => {
            let outcome = state.apply(|s| s.set_quantity(product_id, quantity));
            CartResponse::from_state(state, Some(outcome))
        }
        Err(e) => {
            debug!("Quantity input dropped: {}", e);
            CartResponse::from_state(state, None)
        }
    }
}

/// Sets a line's price from text input in major units (empty means 0).
pub fn update_price<R: SymbolRenderer>(
    state: &mut SessionState<R>,
    product_id: &str,
    input: &str,
) -> CartResponse {
    debug!(product_id = %product_id, input = %input, "update_price command");

    match parse_price_input(input) {
        Ok(price) => {
            let outcome = state.apply(|s| s.set_price(product_id, price));
            CartResponse::from_state(state, Some(outcome))
        }
        Err(e) => {
            debug!("Price input dropped: {}", e);
            CartResponse::from_state(state, None)
        }
    }
}

/// Removes a line from the cart.
pub fn remove_from_cart<R: SymbolRenderer>(
    state: &mut SessionState<R>,
    product_id: &str,
) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    let outcome = state.apply(|s| s.remove(product_id));
    CartResponse::from_state(state, Some(outcome))
}

/// Empties the cart and the customer fields.
pub fn clear_session<R: SymbolRenderer>(state: &mut SessionState<R>) -> CartResponse {
    debug!("clear_session command");

    let outcome = state.apply(|s| s.clear());
    CartResponse::from_state(state, Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_scenario_total() {
        let mut state = SessionState::default();
        add_to_cart(&mut state, "A-001").unwrap();
        add_to_cart(&mut state, "S-002").unwrap();
        let response = add_to_cart(&mut state, "S-002").unwrap();

        assert!(response.applied);
        assert_eq!(response.totals.line_count, 2);
        assert_eq!(response.totals.total_quantity, 3);
        assert_eq!(response.totals.total, Money::from_major(1697));
        assert_eq!(response.items[1].quantity, 2);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut state = SessionState::default();
        let err = add_to_cart(&mut state, "Z-999").unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&state).items.is_empty());
    }

    #[test]
    fn test_quantity_text_input() {
        let mut state = SessionState::default();
        add_to_cart(&mut state, "X-004").unwrap();

        let response = update_quantity(&mut state, "X-004", "4");
        assert!(response.applied);
        assert_eq!(response.items[0].quantity, 4);

        let response = update_quantity(&mut state, "X-004", "");
        assert!(response.applied);
        assert_eq!(response.items[0].quantity, 1);

        let response = update_quantity(&mut state, "X-004", "0");
        assert_eq!(response.ignored, Some(IgnoreReason::QuantityBelowOne));
        assert_eq!(response.items[0].quantity, 1);

        let response = update_quantity(&mut state, "X-004", "lots");
        assert!(!response.applied);
        assert_eq!(response.ignored, None);
        assert_eq!(response.items[0].quantity, 1);
    }

    #[test]
    fn test_negative_price_keeps_catalog_price() {
        let mut state = SessionState::default();
        add_to_cart(&mut state, "A-001").unwrap();

        let response = update_price(&mut state, "A-001", "-5");

        assert_eq!(response.ignored, Some(IgnoreReason::NegativePrice));
        assert_eq!(response.items[0].price, Money::from_major(999));
        assert_eq!(state.payload().total, Money::from_major(999));
    }

    #[test]
    fn test_price_override_and_empty_price() {
        let mut state = SessionState::default();
        add_to_cart(&mut state, "S-001").unwrap();

        let response = update_price(&mut state, "S-001", "850.5");
        assert_eq!(response.totals.total, Money::from_cents(85_050));

        let response = update_price(&mut state, "S-001", "");
        assert!(response.applied);
        assert!(response.totals.total.is_zero());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut state = SessionState::default();
        add_to_cart(&mut state, "A-002").unwrap();
        add_to_cart(&mut state, "X-001").unwrap();

        let response = remove_from_cart(&mut state, "A-002");
        assert!(response.applied);
        assert_eq!(response.items.len(), 1);

        let response = remove_from_cart(&mut state, "A-002");
        assert_eq!(response.ignored, Some(IgnoreReason::NotInCart));

        let response = clear_session(&mut state);
        assert!(response.applied);
        assert!(response.items.is_empty());
        assert!(state.payload().total.is_zero());
    }
}
