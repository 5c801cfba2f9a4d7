//! # Catalog
//!
//! The fixed product list. Defined at compile time, never mutated.

use crate::money::Money;
use crate::types::{Category, CategoryFilter, Product};

const fn product(id: &'static str, name: &'static str, category: Category, price: i64) -> Product {
    Product {
        id,
        name,
        category,
        price: Money::from_major(price),
    }
}

/// Products offered by the demo shop.
pub const SAMPLE_PRODUCTS: [Product; 10] = [
    product("A-001", "iPhone 15", Category::Apple, 999),
    product("A-002", "iPhone 15 Pro", Category::Apple, 1199),
    product("A-003", "iPhone SE", Category::Apple, 399),
    product("S-001", "Galaxy S23", Category::Samsung, 899),
    product("S-002", "Galaxy A54", Category::Samsung, 349),
    product("S-003", "Galaxy Tab S8", Category::Samsung, 699),
    product("X-001", "Xiaomi 13", Category::Xiaomi, 749),
    product("X-002", "Redmi Note 12", Category::Xiaomi, 199),
    product("X-003", "Poco X6", Category::Xiaomi, 279),
    product("X-004", "Mi Band 7", Category::Xiaomi, 49),
];

/// Read-only view over a product list.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    products: &'static [Product],
}

impl Catalog {
    /// The built-in sample catalog.
    pub const fn sample() -> Self {
        Catalog {
            products: &SAMPLE_PRODUCTS,
        }
    }

    /// Every product, in catalog order.
    pub fn all(&self) -> &'static [Product] {
        self.products
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &'static Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Looks a product up by id.
    pub fn find(&self, id: &str) -> Option<&'static Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::sample()
    }
}
