//! # Validation Module
//!
//! Turns what the user typed into quantities and prices, and holds the two
//! sign rules the cart enforces.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Parsing (THIS MODULE)                                        │
//! │  ├── "" → default (quantity 1, price 0)                                │
//! │  ├── "12.50" → 1250 cents                                              │
//! │  └── "abc" → ValidationError (edit dropped, no notice)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Sign rules (THIS MODULE, applied by the cart)                │
//! │  ├── quantity < 1 → ignored                                            │
//! │  └── price < 0    → ignored                                            │
//! │                                                                         │
//! │  No format rules on customer fields. The only upper bound is what      │
//! │  `i64` cents can hold, enforced by the cart.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use qrx_core::validation::{parse_price_input, parse_quantity_input};
//!
//! assert_eq!(parse_quantity_input("3").unwrap(), 3);
//! assert_eq!(parse_quantity_input("").unwrap(), 1);
//! assert_eq!(parse_price_input("12.5").unwrap().cents(), 1250);
//! assert!(parse_price_input("twelve").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Sign Rules
// =============================================================================

/// A line quantity must be at least 1.
#[inline]
pub fn is_valid_quantity(qty: i64) -> bool {
    qty >= 1
}

/// A line price must not be negative. Zero is allowed (free items).
#[inline]
pub fn is_valid_price(price: Money) -> bool {
    !price.is_negative()
}

// =============================================================================
// Text Input Parsers
// =============================================================================

/// Parses a quantity typed into the cart.
///
/// ## Rules
/// - Empty input means 1
/// - Otherwise a whole number, sign allowed (the cart rejects `< 1` later)
/// - A decimal fraction is cut off toward zero (`2.9` → 2, `-2.5` → -2)
pub fn parse_quantity_input(input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(1);
    }

    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_quantity());
    }

    whole.parse::<i64>().map_err(|_| invalid_quantity())
}

fn invalid_quantity() -> ValidationError {
    ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "expected a whole number".to_string(),
    }
}

/// Parses a price typed into the cart, in major units.
///
/// ## Rules
/// - Empty input means 0
/// - Digits with an optional sign and an optional fractional part
/// - More than two decimals are rounded to the nearest cent, half away
///   from zero (`1.005` → `1.01`)
///
/// ## User Workflow
/// ```text
/// price S-002 "299.999"
///      │
///      ▼
/// parse_price_input ← THIS FUNCTION
///      │
///      ├── "abc"    → Err, edit dropped
///      ├── "-5"     → Ok(-500 cents), cart ignores it
///      └── "299.999" → Ok(30000 cents)
/// ```
pub fn parse_price_input(input: &str) -> ValidationResult<Money> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Money::zero());
    }

    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid_price("expected a number such as 12.50"));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| invalid_price("number is too large"))?
    };

    let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().map_or(false, |d| d >= 5);

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
        .ok_or_else(|| invalid_price("number is too large"))?;

    Ok(Money::from_cents(if negative { -cents } else { cents }))
}

fn invalid_price(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
