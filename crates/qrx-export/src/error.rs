//! # Export Errors
//!
//! Failures of the host-facing side of QRX Shop.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Export Error Categories                              │
//! │                                                                         │
//! │  RENDERING                          CLIPBOARD                           │
//! │  ─────────                          ─────────                           │
//! │  • Render (payload too large)       • ClipboardUnavailable              │
//! │  • MissingSymbol (nothing to save)  • ClipboardWrite (denied/failed)    │
//! │                                     • ClipboardTask (worker died)       │
//! │  FILES                                                                  │
//! │  ─────                                                                  │
//! │  • Io (cannot write qr-code.svg)                                        │
//! │                                                                         │
//! │  None of these is fatal: the session shows the message and carries on. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Export operation errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The payload could not be encoded as a QR symbol.
    #[error("QR rendering failed: {0}")]
    Render(#[from] qrcode::types::QrError),

    /// Export was requested but there is no rendered symbol.
    #[error("No QR symbol to export")]
    MissingSymbol,

    /// No clipboard on this host, or clipboard access is turned off.
    #[error("Copy failed: clipboard unavailable ({0})")]
    ClipboardUnavailable(String),

    /// The clipboard refused the write.
    #[error("Copy failed: {0}")]
    ClipboardWrite(String),

    /// The blocking clipboard task did not complete.
    #[error("Copy failed: clipboard task aborted ({0})")]
    ClipboardTask(String),

    /// Writing the SVG file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for export results.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ExportError::MissingSymbol.to_string(), "No QR symbol to export");

        let err = ExportError::ClipboardWrite("access denied".to_string());
        assert_eq!(err.to_string(), "Copy failed: access denied");

        let err = ExportError::Render(qrcode::types::QrError::DataTooLong);
        assert!(err.to_string().starts_with("QR rendering failed"));
    }
}
