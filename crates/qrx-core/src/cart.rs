//! # Cart Store
//!
//! The ordered collection of line items, keyed by product id.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Cart Method             Outcome               │
//! │  ───────────              ───────────             ───────               │
//! │                                                                         │
//! │  add A-001 ──────────────► add() ───────────────► Applied (qty+1/push)  │
//! │                                                                         │
//! │  qty A-001 3 ────────────► set_quantity() ──────► Applied               │
//! │  qty A-001 0 ────────────► set_quantity() ──────► Ignored(QtyBelowOne)  │
//! │                                                                         │
//! │  price A-001 899 ────────► set_price() ─────────► Applied               │
//! │  price A-001 -5 ─────────► set_price() ─────────► Ignored(NegPrice)     │
//! │  qty A-001 10^15 ────────► set_quantity() ──────► Ignored(TooLarge)     │
//! │                                                                         │
//! │  remove A-001 ───────────► remove() ────────────► Applied / NotInCart   │
//! │                                                                         │
//! │  clear ──────────────────► clear() ─────────────► Applied               │
//! │                                                                         │
//! │  NOTE: nothing here returns an error. Rejected edits leave the cart    │
//! │        untouched and report why, the caller decides what to do.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `id` (adding the same product bumps its quantity)
//! - Every line has `quantity >= 1` and `price >= 0`
//! - Lines keep the order in which their product was first added
//! - Every subtotal, the total and the total quantity fit in `i64`

use serde::Serialize;
use tracing::debug;

use crate::money::Money;
use crate::types::{CartLine, Product};
use crate::validation::{is_valid_price, is_valid_quantity};

// =============================================================================
// Mutation Outcome
// =============================================================================

/// Why a cart mutation left the cart unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// `set_quantity` with a value below 1.
    QuantityBelowOne,
    /// `set_price` with a negative value.
    NegativePrice,
    /// The id has no line in the cart.
    NotInCart,
    /// The edit would push a subtotal, the total or the total quantity past
    /// what `i64` can hold.
    AmountTooLarge,
}

/// Result of a cart mutation.
///
/// Only `Applied` changes state, so only `Applied` requires the projection
/// to be recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Mutation {
    Applied,
    Ignored(IgnoreReason),
}

impl Mutation {
    /// Checks if the mutation changed the cart.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by 1
    /// - Product not in cart: new line at the end, quantity 1, name and price
    ///   copied from the product
    pub fn add(&mut self, product: &Product) -> Mutation {
        let candidate = match self.line(product.id) {
            Some(line) => match line.quantity.checked_add(1) {
                Some(quantity) => CartLine {
                    quantity,
                    ..line.clone()
                },
                None => return ignored(product.id, IgnoreReason::AmountTooLarge),
            },
            None => CartLine::from_product(product),
        };

        let mutation = self.commit(candidate);
        if mutation.is_applied() {
            debug!(id = product.id, "cart line added");
        }
        mutation
    }

    /// Replaces the quantity of a line.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> Mutation {
        if !is_valid_quantity(quantity) {
            return ignored(id, IgnoreReason::QuantityBelowOne);
        }

        let candidate = match self.line(id) {
            Some(line) => CartLine {
                quantity,
                ..line.clone()
            },
            None => return ignored(id, IgnoreReason::NotInCart),
        };

        let mutation = self.commit(candidate);
        if mutation.is_applied() {
            debug!(id, quantity, "cart line quantity set");
        }
        mutation
    }

    /// Replaces the unit price of a line.
    ///
    /// The new price belongs to the line only; the catalog is unaffected and
    /// later adds of the same product keep this price.
    pub fn set_price(&mut self, id: &str, price: Money) -> Mutation {
        if !is_valid_price(price) {
            return ignored(id, IgnoreReason::NegativePrice);
        }

        let candidate = match self.line(id) {
            Some(line) => CartLine {
                price,
                ..line.clone()
            },
            None => return ignored(id, IgnoreReason::NotInCart),
        };

        let mutation = self.commit(candidate);
        if mutation.is_applied() {
            debug!(id, price = %price, "cart line price set");
        }
        mutation
    }

    /// Removes a line by product id.
    pub fn remove(&mut self, id: &str) -> Mutation {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.id != id);

        if self.lines.len() == initial_len {
            ignored(id, IgnoreReason::NotInCart)
        } else {
            debug!(id, "cart line removed");
            Mutation::Applied
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in first-insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks a line up by product id.
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    /// Puts `candidate` in place of the line with the same id (or appends
    /// it) if every subtotal and both totals still fit in `i64`.
    fn commit(&mut self, candidate: CartLine) -> Mutation {
        let fits = self
            .lines
            .iter()
            .filter(|line| line.id != candidate.id)
            .chain(std::iter::once(&candidate))
            .try_fold((Money::zero(), 0i64), |(total, quantity), line| {
                let total = total.checked_add(line.checked_subtotal()?)?;
                Some((total, quantity.checked_add(line.quantity)?))
            })
            .is_some();

        if !fits {
            return ignored(&candidate.id, IgnoreReason::AmountTooLarge);
        }

        match self.line_mut(&candidate.id) {
            Some(line) => *line = candidate,
            None => self.lines.push(candidate),
        }
        Mutation::Applied
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `price × quantity` over all lines.
    ///
    /// Cannot overflow: `commit` refuses any edit that would.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

fn ignored(id: &str, reason: IgnoreReason) -> Mutation {
    debug!(id, ?reason, "cart mutation ignored");
    Mutation::Ignored(reason)
}

// =============================================================================
// Unit Tests
// =============================================================================
