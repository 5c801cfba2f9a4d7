//! # Domain Types
//!
//! Core domain types used throughout QRX Shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │  CustomerInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (A-001)     │──►│  id             │   │  name           │       │
//! │  │  name           │──►│  name (frozen)  │   │  email          │       │
//! │  │  category       │   │  price (edit)   │   │  phone          │       │
//! │  │  price          │──►│  quantity       │   │  "" = absent    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Category     │   │ CategoryFilter  │                             │
//! │  │  Apple          │   │  All            │                             │
//! │  │  Samsung        │   │  Only(Category) │                             │
//! │  │  Xiaomi         │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartLine` copies the product's name and price when it is created.
//! After that the line owns its price: edits land on the line, and the
//! catalog is never consulted again.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Brand category of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Apple,
    Samsung,
    Xiaomi,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Apple, Category::Samsung, Category::Xiaomi];

    /// Returns the display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Apple => "Apple",
            Category::Samsung => "Samsung",
            Category::Xiaomi => "Xiaomi",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// The category tab selected in the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show the whole catalog.
    #[default]
    All,
    /// Show one brand only.
    Only(Category),
}

impl CategoryFilter {
    /// Checks whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "apple" => Ok(CategoryFilter::Only(Category::Apple)),
            "samsung" => Ok(CategoryFilter::Only(Category::Samsung)),
            "xiaomi" => Ok(CategoryFilter::Only(Category::Xiaomi)),
            _ => Err(ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: vec![
                    "All".to_string(),
                    "Apple".to_string(),
                    "Samsung".to_string(),
                    "Xiaomi".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the fixed catalog.
///
/// Fields are `'static` because the catalog is a compile-time constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique business identifier (e.g. `A-001`).
    pub id: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Brand category.
    pub category: Category,

    /// List price.
    pub price: Money,
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line item in the cart, keyed by product id.
///
/// The serialized form is exactly one element of the payload's `items` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product id this line refers to.
    pub id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price. Starts at the catalog price, then follows user edits.
    #[ts(type = "number")]
    pub price: Money,

    /// Always >= 1.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl CartLine {
    /// Creates a new line with quantity 1 from a catalog product.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment and decoupled from the catalog.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            id: product.id.to_string(),
            name: product.name.to_string(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Calculates the line subtotal (price × quantity).
    ///
    /// Lines held by a [`Cart`](crate::cart::Cart) never overflow here; the
    /// cart refuses edits that would.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.price * self.quantity
    }

    /// Line subtotal, `None` if it does not fit in `i64` cents.
    #[inline]
    pub fn checked_subtotal(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Free-text contact details typed by the customer.
///
/// Empty strings mean "not given" and project to `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerInfo {
    /// Checks if no field has been filled in.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
    }
}

/// Maps the empty string to `None`; everything else is kept verbatim.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
