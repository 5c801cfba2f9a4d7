//! # Customer Commands
//!
//! Free-text customer fields. Any text is accepted, including text that is
//! not a valid email or phone number; an empty string clears the field.

use tracing::debug;

use qrx_export::SymbolRenderer;

use crate::commands::cart::CartResponse;
use crate::state::SessionState;

/// Which customer field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
}

/// Replaces one customer field.
pub fn set_customer_field<R: SymbolRenderer>(
    state: &mut SessionState<R>,
    field: CustomerField,
    value: &str,
) -> CartResponse {
    debug!(?field, "set_customer_field command");

    let outcome = state.apply(|s| match field {
        CustomerField::Name => s.set_name(value),
        CustomerField::Email => s.set_email(value),
        CustomerField::Phone => s.set_phone(value),
    });
    CartResponse::from_state(state, Some(outcome))
}
