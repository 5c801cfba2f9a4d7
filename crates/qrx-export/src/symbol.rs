//! # Symbol Rendering
//!
//! Turns the payload string into a scannable QR symbol.
//!
//! The encoder is a black box behind [`SymbolRenderer`]. No capacity check
//! happens before encoding: an oversized payload is handed to the encoder
//! as-is and its refusal comes back as [`ExportError::Render`].

use qrcode::render::{svg, unicode};
use qrcode::QrCode;
use tracing::debug;

use crate::error::ExportResult;

// =============================================================================
// Symbol
// =============================================================================

/// A rendered QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    markup: String,
    preview: String,
    modules: usize,
}

impl Symbol {
    /// Standalone SVG document (what `qr-code.svg` contains).
    pub fn svg(&self) -> &str {
        &self.markup
    }

    /// Text rendering with Unicode half blocks, for a terminal.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Number of modules along one side, quiet zone excluded.
    pub fn modules(&self) -> usize {
        self.modules
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Capability: `render(string) -> scannable symbol`.
pub trait SymbolRenderer {
    fn render(&self, data: &str) -> ExportResult<Symbol>;
}

/// Look of the rendered symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Minimum edge length of the SVG in pixels.
    pub size: u32,
    pub dark_color: String,
    pub light_color: String,
    pub quiet_zone: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            size: 180,
            dark_color: "#000000".to_string(),
            light_color: "#ffffff".to_string(),
            quiet_zone: true,
        }
    }
}

/// [`SymbolRenderer`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    options: RenderOptions,
}

impl QrRenderer {
    pub fn new(options: RenderOptions) -> Self {
        QrRenderer { options }
    }
}

impl SymbolRenderer for QrRenderer {
    fn render(&self, data: &str) -> ExportResult<Symbol> {
        let code = QrCode::new(data.as_bytes())?;
        let opts = &self.options;

        let markup = code
            .render::<svg::Color<'_>>()
            .min_dimensions(opts.size, opts.size)
            .dark_color(svg::Color(&opts.dark_color))
            .light_color(svg::Color(&opts.light_color))
            .quiet_zone(opts.quiet_zone)
            .build();

        // Inverted so the symbol reads correctly on dark terminals
        let preview = code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(opts.quiet_zone)
            .build();

        debug!(bytes = data.len(), modules = code.width(), "QR symbol rendered");

        Ok(Symbol {
            markup,
            preview,
            modules: code.width(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;

    #[test]
    fn test_renders_svg_document() {
        let symbol = QrRenderer::default().render(r#"{"items":[]}"#).unwrap();

        assert!(symbol.svg().contains("<svg"));
        assert!(symbol.svg().contains("#000000"));
        assert!(symbol.modules() >= 21);
        assert!(!symbol.preview().is_empty());
    }

    #[test]
    fn test_custom_colors() {
        let renderer = QrRenderer::new(RenderOptions {
            dark_color: "#1e1b4b".to_string(),
            ..RenderOptions::default()
        });
        let symbol = renderer.render("hello").unwrap();
        assert!(symbol.svg().contains("#1e1b4b"));
    }

    #[test]
    fn test_oversized_payload_is_a_render_error() {
        let data = "x".repeat(8000);
        let err = QrRenderer::default().render(&data).unwrap_err();
        assert!(matches!(err, ExportError::Render(_)));
    }
}
