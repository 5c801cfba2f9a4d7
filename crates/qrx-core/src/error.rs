//! # Error Types
//!
//! Domain-specific error types for qrx-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  qrx-core errors (this file)                                           │
//! │  ├── CoreError        - Catalog lookups, payload serialization         │
//! │  └── ValidationError  - Text input that is not a number                │
//! │                                                                         │
//! │  qrx-export errors (separate crate)                                    │
//! │  └── ExportError      - Rendering, clipboard, file export              │
//! │                                                                         │
//! │  qrx-shop errors (in app)                                              │
//! │  └── ApiError         - The notice the user sees                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → notice                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations never produce errors. A rejected edit is a
//! [`Mutation::Ignored`](crate::cart::Mutation) outcome, not a failure.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core storefront errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not part of the catalog.
    ///
    /// ## When This Occurs
    /// - `add X-999` in the session
    /// - `qrx-shop order --add X-999`
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Payload could not be turned into JSON.
    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while parsing text into numbers. The session treats these the
/// same way as a rejected edit: the cart stays as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid format (e.g., letters in a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Unknown category name.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
