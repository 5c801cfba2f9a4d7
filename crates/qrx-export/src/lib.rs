//! # qrx-export: QR Symbol and Host Side Effects
//!
//! Owns every interaction with the outside world that the payload needs:
//! encoding it as a QR symbol, putting it on the clipboard and writing the
//! symbol to `qr-code.svg`.
//!
//! ## Module Organization
//! ```text
//! qrx_export/
//! ├── lib.rs        ◄─── You are here
//! ├── symbol.rs     ◄─── SymbolRenderer trait + qrcode backend
//! ├── clipboard.rs  ◄─── ClipboardSink trait + arboard backend
//! ├── exporter.rs   ◄─── QrExporter (latest json + symbol, export actions)
//! └── error.rs      ◄─── ExportError
//! ```
//!
//! ## Example
//! ```rust
//! use qrx_export::{QrExporter, QrRenderer};
//!
//! let mut exporter = QrExporter::new(QrRenderer::default());
//! let symbol = exporter.refresh("{\"items\": []}".to_string()).unwrap();
//! assert!(symbol.svg().contains("<svg"));
//! ```

pub mod clipboard;
pub mod error;
pub mod exporter;
pub mod symbol;

pub use clipboard::{copy_text, ClipboardSink, DisabledClipboard, MemoryClipboard, SystemClipboard};
pub use error::{ExportError, ExportResult};
pub use exporter::{write_svg, QrExporter};
pub use symbol::{QrRenderer, RenderOptions, Symbol, SymbolRenderer};
