//! # qrx-core: Pure Storefront Logic for QRX Shop
//!
//! This crate holds everything QRX Shop decides on its own: the product
//! catalog, the cart state machine, the customer fields and the projection of
//! all of it into the JSON payload that ends up inside a QR code.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QRX Shop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 qrx-shop (interactive session)                  │   │
//! │  │     products ──► add / qty / price ──► name / email ──► copy    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ qrx-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  session  │  │  payload  │  │   │
//! │  │   │  Product  │  │ CartLine  │  │ Customer  │  │  Payload  │  │   │
//! │  │   │ Category  │  │ Mutation  │  │  Filter   │  │  to_json  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS • PURE FUNCTIONS                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ payload JSON                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 qrx-export (QR symbol, clipboard, SVG)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, CartLine, CustomerInfo)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - The fixed sample catalog
//! - [`cart`] - Cart store and its mutation outcomes
//! - [`session`] - The state object owned by the UI controller
//! - [`payload`] - Pure projection into the QR payload
//! - [`validation`] - Parsing of text input into quantities and prices
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use qrx_core::{Catalog, Session};
//!
//! let catalog = Catalog::sample();
//! let mut session = Session::new();
//!
//! let iphone = catalog.find("A-001").unwrap();
//! let _ = session.add(iphone);
//! let _ = session.set_name("Ada");
//!
//! let payload = session.project(Utc::now());
//! assert_eq!(payload.total.cents(), 99_900);
//! assert_eq!(payload.user.name.as_deref(), Some("Ada"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod payload;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, IgnoreReason, Mutation};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payload::{project, Payload, PayloadUser};
pub use session::Session;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name shown in the session banner and used as the default store name.
pub const STORE_NAME: &str = "Samio Shop";

/// File name offered for the exported QR symbol.
pub const EXPORT_FILE_NAME: &str = "qr-code.svg";
