//! # Clipboard
//!
//! Host clipboard access for the "copy JSON" action.
//!
//! ## Write Flow
//! ```text
//! copy ──► copy_text(sink, json)
//!              │
//!              ▼
//!         spawn_blocking ──► sink.write_text(json)
//!              │                    │
//!              │          ┌─────────┴──────────┐
//!              ▼          ▼                    ▼
//!           await      Ok(())         Err(ExportError)
//!              │          │                    │
//!              └──────────┴─► notice to the user, no state change
//! ```
//!
//! The write is the only operation in the app that is asynchronous from the
//! host's point of view. Its outcome never mutates the session.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};

/// Capability: put text on a clipboard.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: String) -> ExportResult<()>;
}

/// Writes `text` to `sink` on a blocking task.
pub async fn copy_text(sink: Arc<dyn ClipboardSink>, text: String) -> ExportResult<()> {
    let bytes = text.len();
    let result = tokio::task::spawn_blocking(move || sink.write_text(text))
        .await
        .map_err(|e| ExportError::ClipboardTask(e.to_string()))?;

    match &result {
        Ok(()) => debug!(bytes, "payload copied to clipboard"),
        Err(e) => warn!(error = %e, "clipboard write failed"),
    }
    result
}

// =============================================================================
// System Clipboard
// =============================================================================

/// The desktop clipboard, through `arboard`.
///
/// A fresh handle is opened per write, so a clipboard that appears or
/// disappears during the session is picked up on the next copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: String) -> ExportResult<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ExportError::ClipboardUnavailable(e.to_string()))?;

        clipboard.set_text(text).map_err(|e| match e {
            arboard::Error::ClipboardNotSupported => {
                ExportError::ClipboardUnavailable("not supported on this host".to_string())
            }
            other => ExportError::ClipboardWrite(other.to_string()),
        })
    }
}

// =============================================================================
// Disabled Clipboard
// =============================================================================

/// Stand-in used when clipboard access is turned off in the configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClipboard;

impl ClipboardSink for DisabledClipboard {
    fn write_text(&self, _text: String) -> ExportResult<()> {
        Err(ExportError::ClipboardUnavailable(
            "clipboard access is disabled".to_string(),
        ))
    }
}

// =============================================================================
// Memory Clipboard
// =============================================================================

/// In-process clipboard that keeps the last written text.
///
/// Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: String) -> ExportResult<()> {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text);
        Ok(())
    }
}
