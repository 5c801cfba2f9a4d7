//! # API Error Type
//!
//! Unified error type for shop commands. An `ApiError` is what the user sees
//! as a notice: the session prints it and waits for the next command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in QRX Shop                               │
//! │                                                                         │
//! │  "copy"                                                                 │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Export Error? ─── ExportError::ClipboardWrite("...") ──┐       │  │
//! │  │         │                                               │       │  │
//! │  │         ▼                                               ▼       │  │
//! │  │  Lookup Error? ─── CoreError::ProductNotFound ───── ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── "! Copy failed: access denied" printed, session continues        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected cart edits (negative price, quantity below 1) never become an
//! `ApiError`; they are silent by design of the cart.

use serde::Serialize;
use qrx_core::CoreError;
use qrx_export::ExportError;

use crate::state::ConfigError;

/// API error returned from shop commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: Z-000"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Input could not be understood
    ValidationError,

    /// Session input is not a known command
    UnknownCommand,

    /// QR symbol could not be rendered or is missing
    SymbolError,

    /// Clipboard unavailable or write refused
    ClipboardError,

    /// File export or terminal I/O failed
    IoError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unknown-command error.
    pub fn unknown_command(input: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command: '{}'. Type 'help' for the list.", input),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::Serialization(e) => {
                tracing::error!("Payload serialization failed: {}", e);
                ApiError::internal("Could not serialize the payload")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts export errors to API errors.
///
/// The underlying description is kept in the message so the user sees why
/// a copy or download failed.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        let code = match &err {
            ExportError::Render(_) | ExportError::MissingSymbol => ErrorCode::SymbolError,
            ExportError::ClipboardUnavailable(_)
            | ExportError::ClipboardWrite(_)
            | ExportError::ClipboardTask(_) => ErrorCode::ClipboardError,
            ExportError::Io { .. } => ErrorCode::IoError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Terminal read/write failures.
impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_errors_keep_description() {
        let err: ApiError = ExportError::ClipboardWrite("access denied".to_string()).into();
        assert_eq!(err.code, ErrorCode::ClipboardError);
        assert_eq!(err.message, "Copy failed: access denied");

        let err: ApiError = ExportError::MissingSymbol.into();
        assert_eq!(err.code, ErrorCode::SymbolError);
    }

    #[test]
    fn test_core_errors() {
        let err: ApiError = CoreError::ProductNotFound("Z-000".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: Z-000");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", "Z-000");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: Z-000");
    }
}
