//! # Session
//!
//! The one state object of a shopping session: cart, customer fields and the
//! selected catalog filter.
//!
//! Nothing else holds mutable storefront state. The UI layer owns exactly one
//! `Session` and changes it only through the methods below; every method that
//! can change what ends up in the payload reports a [`Mutation`].

use chrono::{DateTime, Utc};

use crate::cart::{Cart, Mutation};
use crate::money::Money;
use crate::payload::{project, Payload};
use crate::types::{CategoryFilter, CustomerInfo, Product};

/// Cart + customer + filter, owned by a single controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    cart: Cart,
    customer: CustomerInfo,
    filter: CategoryFilter,
}

impl Session {
    /// Creates an empty session: no lines, no customer details, all categories.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn add(&mut self, product: &Product) -> Mutation {
        self.cart.add(product)
    }

    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> Mutation {
        self.cart.set_quantity(id, quantity)
    }

    pub fn set_price(&mut self, id: &str, price: Money) -> Mutation {
        self.cart.set_price(id, price)
    }

    pub fn remove(&mut self, id: &str) -> Mutation {
        self.cart.remove(id)
    }

    /// Empties the cart and resets the customer fields.
    ///
    /// The catalog filter is a view setting and survives.
    pub fn clear(&mut self) -> Mutation {
        self.cart.clear();
        self.customer.clear();
        Mutation::Applied
    }

    // =========================================================================
    // Customer
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) -> Mutation {
        self.customer.name = name.into();
        Mutation::Applied
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Mutation {
        self.customer.email = email.into();
        Mutation::Applied
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Mutation {
        self.customer.phone = phone.into();
        Mutation::Applied
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Selects the catalog category tab. Does not affect the payload.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Projects the current state into a payload stamped with `now`.
    pub fn project(&self, now: DateTime<Utc>) -> Payload {
        project(&self.customer, self.cart.lines(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::Category;
    use proptest::prelude::*;

    #[test]
    fn test_clear_resets_cart_and_customer_but_not_filter() {
        let catalog = Catalog::sample();
        let mut session = Session::new();
        let _ = session.add(catalog.find("A-001").unwrap());
        let _ = session.set_name("Ada");
        let _ = session.set_email("ada@example.com");
        let _ = session.set_phone("01700000000");
        session.set_filter(CategoryFilter::Only(Category::Apple));

        assert!(session.clear().is_applied());

        assert!(session.cart().is_empty());
        assert!(session.customer().is_empty());
        assert_eq!(session.filter(), CategoryFilter::Only(Category::Apple));
    }

    #[test]
    fn test_customer_fields_project() {
        let mut session = Session::new();
        let _ = session.set_email("ada@example.com");

        let payload = session.project(Utc::now());
        assert_eq!(payload.user.name, None);
        assert_eq!(payload.user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(payload.user.phone, None);
    }

    proptest! {
        #[test]
        fn prop_clear_always_resets(
            adds in prop::collection::vec(0..10usize, 0..20),
            name in ".{0,12}",
            phone in "[0-9]{0,11}",
        ) {
            let catalog = Catalog::sample();
            let mut session = Session::new();
            for i in adds {
                let _ = session.add(&catalog.all()[i]);
            }
            let _ = session.set_name(name);
            let _ = session.set_phone(phone);

            let _ = session.clear();

            let payload = session.project(Utc::now());
            prop_assert!(payload.items.is_empty());
            prop_assert!(payload.total.is_zero());
            prop_assert_eq!(payload.user.name, None);
            prop_assert_eq!(payload.user.email, None);
            prop_assert_eq!(payload.user.phone, None);
        }
    }
}
