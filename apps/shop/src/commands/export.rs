//! # Export Commands
//!
//! Showing the payload and getting it off the screen.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Export Actions                                       │
//! │                                                                         │
//! │  json ──────► SessionState::json()         (always available)          │
//! │                                                                         │
//! │  qr ────────► Symbol::preview()            SYMBOL_ERROR if no symbol    │
//! │                                                                         │
//! │  copy ──────► ClipboardSink (blocking task) CLIPBOARD_ERROR on failure  │
//! │                                                                         │
//! │  download ──► <dir>/qr-code.svg             SYMBOL_ERROR / IO_ERROR     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use qrx_export::{ClipboardSink, ExportError, SymbolRenderer};

use crate::error::{ApiError, ErrorCode};
use crate::state::SessionState;

/// The serialized payload, exactly as it is encoded and copied.
pub fn show_json<R: SymbolRenderer>(state: &SessionState<R>) -> String {
    debug!("show_json command");
    state.json().to_string()
}

/// The terminal preview of the current QR symbol.
pub fn show_qr<R: SymbolRenderer>(state: &SessionState<R>) -> Result<String, ApiError> {
    debug!("show_qr command");

    match (state.symbol(), state.symbol_error()) {
        (Some(symbol), _) => Ok(symbol.preview().to_string()),
        (None, Some(reason)) => Err(ApiError::new(ErrorCode::SymbolError, reason)),
        (None, None) => Err(ExportError::MissingSymbol.into()),
    }
}

/// Copies the serialized payload to the clipboard.
///
/// Works even when the last render failed: the text is always there.
pub async fn copy_json<R: SymbolRenderer>(
    state: &SessionState<R>,
    sink: Arc<dyn ClipboardSink>,
) -> Result<(), ApiError> {
    debug!("copy_json command");

    state.exporter().copy_json(sink).await?;
    info!(bytes = state.json().len(), "Payload copied to clipboard");
    Ok(())
}

/// Writes the current symbol to `dir/qr-code.svg`.
pub fn download_svg<R: SymbolRenderer>(
    state: &SessionState<R>,
    dir: &Path,
) -> Result<PathBuf, ApiError> {
    debug!(dir = %dir.display(), "download_svg command");

    Ok(state.exporter().download_svg(dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use qrx_export::{DisabledClipboard, MemoryClipboard};

    #[test]
    fn test_show_json_matches_payload() {
        let mut state = SessionState::default();
        add_to_cart(&mut state, "A-003").unwrap();

        let json = show_json(&state);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["items"][0]["id"], "A-003");
        assert_eq!(parsed["total"], 399);
    }

    #[test]
    fn test_show_qr_preview() {
        let state = SessionState::default();
        let preview = show_qr(&state).unwrap();
        assert!(!preview.is_empty());
    }

    #[tokio::test]
    async fn test_copy_writes_exact_json() {
        let mut state = SessionState::default();
        add_to_cart(&mut state, "S-003").unwrap();

        let clipboard = Arc::new(MemoryClipboard::new());
        copy_json(&state, clipboard.clone()).await.unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some(state.json()));
    }

    #[tokio::test]
    async fn test_copy_failure_is_reported() {
        let state = SessionState::default();
        let err = copy_json(&state, Arc::new(DisabledClipboard)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ClipboardError);
        assert!(err.message.starts_with("Copy failed"));
    }

    #[test]
    fn test_download_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState::default();

        let path = download_svg(&state, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("qr-code.svg"));
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
    }
}
