//! # Session State
//!
//! The controller that owns the single [`Session`] and keeps its projection
//! current.
//!
//! ## Recompute Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SessionState::apply                                  │
//! │                                                                         │
//! │  command ──► apply(|s| s.add(product)) ──► Mutation                     │
//! │                                               │                         │
//! │                        ┌──────────────────────┴──────────────┐          │
//! │                        ▼                                     ▼          │
//! │                    Applied                              Ignored(..)     │
//! │                        │                                     │          │
//! │                        ▼                                     ▼          │
//! │   payload = session.project(now)                  debug log, nothing   │
//! │   exporter.refresh(payload json)                  else changes          │
//! │   symbol_error = render failure, if any                                 │
//! │                                                                         │
//! │  The payload, json and symbol always describe the current session      │
//! │  (up to a render failure, which leaves no symbol at all).              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, error, warn};

use qrx_core::{Catalog, CategoryFilter, Mutation, Payload, Session};
use qrx_export::{QrExporter, QrRenderer, Symbol, SymbolRenderer};

/// Session + latest projection, owned by the interactive loop.
#[derive(Debug)]
pub struct SessionState<R = QrRenderer> {
    session: Session,
    catalog: Catalog,
    exporter: QrExporter<R>,
    payload: Payload,
    symbol_error: Option<String>,
}

impl<R: SymbolRenderer> SessionState<R> {
    /// Creates an empty session over the sample catalog and renders its
    /// (empty) payload.
    pub fn new(renderer: R) -> Self {
        let session = Session::new();
        let payload = session.project(Utc::now());

        let mut state = SessionState {
            session,
            catalog: Catalog::sample(),
            exporter: QrExporter::new(renderer),
            payload,
            symbol_error: None,
        };
        state.render();
        state
    }

    /// Runs one session mutation and recomputes the projection if it applied.
    pub fn apply<F>(&mut self, mutate: F) -> Mutation
    where
        F: FnOnce(&mut Session) -> Mutation,
    {
        let outcome = mutate(&mut self.session);

        match outcome {
            Mutation::Applied => {
                self.payload = self.session.project(Utc::now());
                self.render();
            }
            Mutation::Ignored(reason) => debug!(?reason, "Mutation ignored"),
        }

        outcome
    }

    /// Selects the catalog tab. The payload does not depend on it.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.session.set_filter(filter);
    }

    fn render(&mut self) {
        let json = match self.payload.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Payload serialization failed: {}", e);
                self.symbol_error = Some(e.to_string());
                return;
            }
        };

        self.symbol_error = match self.exporter.refresh(json) {
            Ok(symbol) => {
                debug!(modules = symbol.modules(), "QR symbol refreshed");
                None
            }
            Err(e) => {
                warn!("QR render failed: {}", e);
                Some(e.to_string())
            }
        };
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The latest projection.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The serialized projection, exactly what gets copied and encoded.
    pub fn json(&self) -> &str {
        self.exporter.json()
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        self.exporter.symbol()
    }

    /// Why the last render produced no symbol.
    pub fn symbol_error(&self) -> Option<&str> {
        self.symbol_error.as_deref()
    }

    pub fn exporter(&self) -> &QrExporter<R> {
        &self.exporter
    }
}

impl Default for SessionState<QrRenderer> {
    fn default() -> Self {
        Self::new(QrRenderer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrx_core::{IgnoreReason, Money};
    use qrx_export::{ExportError, ExportResult};

    /// Renders nothing once the payload grows past `limit` bytes.
    struct Limited {
        limit: usize,
    }

    impl SymbolRenderer for Limited {
        fn render(&self, data: &str) -> ExportResult<Symbol> {
            if data.len() > self.limit {
                return Err(ExportError::MissingSymbol);
            }
            QrRenderer::default().render(data)
        }
    }

    #[test]
    fn test_new_state_has_empty_projection() {
        let state = SessionState::default();

        assert!(state.payload().items.is_empty());
        assert!(state.payload().total.is_zero());
        assert!(state.symbol().is_some());
        assert!(state.json().contains("\"items\": []"));
    }

    #[test]
    fn test_applied_mutation_recomputes() {
        let mut state = SessionState::default();
        let product = state.catalog().find("A-001").unwrap();

        let before = state.json().to_string();
        assert!(state.apply(|s| s.add(product)).is_applied());

        assert_ne!(state.json(), before);
        assert_eq!(state.payload().items.len(), 1);
        assert_eq!(state.payload().total, Money::from_major(999));
        assert!(state.json().contains("\"A-001\""));
    }

    #[test]
    fn test_ignored_mutation_keeps_projection() {
        let mut state = SessionState::default();
        let product = state.catalog().find("A-001").unwrap();
        let _ = state.apply(|s| s.add(product));
        let before = state.payload().clone();

        let outcome = state.apply(|s| s.set_price("A-001", Money::from_cents(-500)));

        assert_eq!(outcome, Mutation::Ignored(IgnoreReason::NegativePrice));
        assert_eq!(state.payload(), &before);
    }

    #[test]
    fn test_filter_does_not_touch_payload() {
        let mut state = SessionState::default();
        let before = state.json().to_string();

        state.set_filter("samsung".parse().unwrap());

        assert_eq!(state.json(), before);
        assert_eq!(state.session().filter().to_string(), "Samsung");
    }

    #[test]
    fn test_render_failure_is_recorded_and_cleared() {
        let mut state = SessionState::new(Limited { limit: 200 });
        assert!(state.symbol_error().is_none());

        let _ = state.apply(|s| s.set_name("x".repeat(300)));
        assert!(state.symbol().is_none());
        assert!(state.symbol_error().is_some());
        assert!(state.json().contains(&"x".repeat(300)));

        let _ = state.apply(|s| s.set_name(""));
        assert!(state.symbol().is_some());
        assert!(state.symbol_error().is_none());
    }
}
