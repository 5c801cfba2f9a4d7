//! # QR Exporter
//!
//! Holds the latest serialized payload and its rendered symbol, and offers
//! the two export actions.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    QrExporter                                           │
//! │                                                                         │
//! │  accepted mutation ──► refresh(json) ──► renderer.render(json)          │
//! │                                               │                         │
//! │                               ┌───────────────┴──────────────┐          │
//! │                               ▼                              ▼          │
//! │                        symbol = Some(..)              symbol = None     │
//! │                                                       (render error)    │
//! │                                                                         │
//! │  copy_json(sink) ──► clipboard gets `json` (works without a symbol)     │
//! │                                                                         │
//! │  download_svg(dir) ──► dir/qr-code.svg, or MissingSymbol                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use qrx_core::EXPORT_FILE_NAME;
use tracing::info;

use crate::clipboard::{copy_text, ClipboardSink};
use crate::error::{ExportError, ExportResult};
use crate::symbol::{QrRenderer, Symbol, SymbolRenderer};

/// Latest payload text + symbol, with copy and download actions.
#[derive(Debug)]
pub struct QrExporter<R = QrRenderer> {
    renderer: R,
    json: String,
    symbol: Option<Symbol>,
}

impl<R: SymbolRenderer> QrExporter<R> {
    /// Creates an exporter with nothing rendered yet.
    pub fn new(renderer: R) -> Self {
        QrExporter {
            renderer,
            json: String::new(),
            symbol: None,
        }
    }

    /// Replaces the payload text and re-renders the symbol.
    ///
    /// On a render failure the previous symbol is dropped, so a later
    /// download cannot export a code that no longer matches the payload.
    pub fn refresh(&mut self, json: String) -> ExportResult<&Symbol> {
        self.symbol = None;
        let symbol = self.renderer.render(&json);
        self.json = json;
        Ok(self.symbol.insert(symbol?))
    }

    /// The serialized payload the symbol encodes.
    pub fn json(&self) -> &str {
        &self.json
    }

    /// The current symbol, if the last render succeeded.
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    /// Copies the serialized payload to the clipboard.
    pub async fn copy_json(&self, sink: Arc<dyn ClipboardSink>) -> ExportResult<()> {
        copy_text(sink, self.json.clone()).await
    }

    /// Writes the symbol's SVG markup to `dir/qr-code.svg`.
    pub fn download_svg(&self, dir: &Path) -> ExportResult<PathBuf> {
        let symbol = self.symbol.as_ref().ok_or(ExportError::MissingSymbol)?;
        write_svg(symbol, dir)
    }
}

/// Writes `symbol` as `qr-code.svg` inside `dir`, creating `dir` if needed.
pub fn write_svg(symbol: &Symbol, dir: &Path) -> ExportResult<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    let io_err = |source| ExportError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;
    fs::write(&path, symbol.svg()).map_err(io_err)?;

    info!(path = %path.display(), "QR symbol exported");
    Ok(path)
}
