//! # Interactive Session
//!
//! The event loop: one line of input, one command, one redraw.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Loop                                         │
//! │                                                                         │
//! │   "> " ──► read line ──► Action::parse ──► dispatch ──► print          │
//! │     ▲                         │                │                        │
//! │     │                         ▼                ▼                        │
//! │     │                  "! Unknown command"  "! Copy failed: ..."        │
//! │     │                         │                │                        │
//! │     └─────────────────────────┴────────────────┘                        │
//! │                                                                         │
//! │   Ends on `quit` or end of input. Failures never end the session.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use qrx_export::{ClipboardSink, QrRenderer};
use tracing::info;

use crate::commands::cart::{self, CartResponse};
use crate::commands::catalog::{list_products, set_filter};
use crate::commands::customer::{set_customer_field, CustomerField};
use crate::commands::export::{copy_json, download_svg, show_json, show_qr};
use crate::error::ApiError;
use crate::state::{SessionState, ShopConfig};

const HELP: &str = "\
Commands:
  products [category]     list products (all, apple, samsung, xiaomi)
  filter <category>       switch the catalog tab
  add <id>                add one unit of a product
  qty <id> [n]            set quantity (empty means 1)
  price <id> [amount]     set unit price (empty means 0)
  remove <id>             remove a line
  name|email|phone [text] set a customer field (empty clears it)
  cart                    show the cart
  json                    show the payload
  qr                      show the QR code
  copy                    copy the payload to the clipboard
  download [dir]          save qr-code.svg
  clear                   empty the cart and customer fields
  help                    show this list
  quit                    leave the session";

// =============================================================================
// Actions
// =============================================================================

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Empty,
    Products(Option<String>),
    Filter(String),
    Add(String),
    Quantity { id: String, input: String },
    Price { id: String, input: String },
    Remove(String),
    Customer(CustomerField, String),
    Cart,
    Json,
    Qr,
    Copy,
    Download(Option<PathBuf>),
    Clear,
    Help,
    Quit,
}

impl Action {
    /// Parses a line of input. The command word is case-insensitive; the
    /// rest of the line is kept as typed.
    pub fn parse(line: &str) -> Result<Action, ApiError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let rest_opt = || (!rest.is_empty()).then(|| rest.to_string());

        let action = match word.to_lowercase().as_str() {
            "" => Action::Empty,
            "products" | "ls" => Action::Products(rest_opt()),
            "filter" => Action::Filter(required(rest, "filter <category>")?),
            "add" => Action::Add(required(rest, "add <id>")?),
            "qty" => {
                let (id, input) = id_and_value(rest, "qty <id> [n]")?;
                Action::Quantity { id, input }
            }
            "price" => {
                let (id, input) = id_and_value(rest, "price <id> [amount]")?;
                Action::Price { id, input }
            }
            "remove" | "rm" => Action::Remove(required(rest, "remove <id>")?),
            "name" => Action::Customer(CustomerField::Name, rest.to_string()),
            "email" => Action::Customer(CustomerField::Email, rest.to_string()),
            "phone" => Action::Customer(CustomerField::Phone, rest.to_string()),
            "cart" => Action::Cart,
            "json" => Action::Json,
            "qr" => Action::Qr,
            "copy" => Action::Copy,
            "download" => Action::Download(rest_opt().map(PathBuf::from)),
            "clear" => Action::Clear,
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            _ => return Err(ApiError::unknown_command(word)),
        };

        Ok(action)
    }
}

fn required(rest: &str, usage: &str) -> Result<String, ApiError> {
    if rest.is_empty() {
        return Err(ApiError::validation(format!("Usage: {}", usage)));
    }
    Ok(rest.to_string())
}

fn id_and_value(rest: &str, usage: &str) -> Result<(String, String), ApiError> {
    let rest = required(rest, usage)?;
    let (id, value) = rest.split_once(char::is_whitespace).unwrap_or((rest.as_str(), ""));
    Ok((id.to_string(), value.trim().to_string()))
}

// =============================================================================
// Session Loop
// =============================================================================

/// The interactive session: one `SessionState`, a clipboard, an output.
pub struct Repl<'a, W: Write> {
    state: SessionState,
    config: &'a ShopConfig,
    clipboard: Arc<dyn ClipboardSink>,
    out: W,
}

impl<'a, W: Write> Repl<'a, W> {
    pub fn new(config: &'a ShopConfig, clipboard: Arc<dyn ClipboardSink>, out: W) -> Self {
        Repl {
            state: SessionState::new(QrRenderer::new(config.render_options())),
            config,
            clipboard,
            out,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<B: BufRead>(&mut self, mut input: B) -> Result<(), ApiError> {
        info!(store = %self.config.store_name, "Session started");
        writeln!(
            self.out,
            "{}: type 'help' for commands",
            self.config.store_name
        )?;

        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                break;
            }

            let outcome = match Action::parse(&line) {
                Ok(Action::Quit) => break,
                Ok(action) => self.dispatch(action).await,
                Err(e) => Err(e),
            };

            if let Err(e) = outcome {
                writeln!(self.out, "! {}", e.message)?;
            }
        }

        info!("Session ended");
        Ok(())
    }

    async fn dispatch(&mut self, action: Action) -> Result<(), ApiError> {
        match action {
            Action::Empty | Action::Quit => {}
            Action::Help => writeln!(self.out, "{}", HELP)?,
            Action::Products(filter) => self.print_products(filter.as_deref())?,
            Action::Filter(input) => {
                let filter = set_filter(&mut self.state, &input)?;
                writeln!(self.out, "Showing: {}", filter)?;
                self.print_products(None)?;
            }
            Action::Add(id) => {
                let response = cart::add_to_cart(&mut self.state, &id)?;
                self.report(&response)?;
            }
            Action::Quantity { id, input } => {
                let response = cart::update_quantity(&mut self.state, &id, &input);
                self.report(&response)?;
            }
            Action::Price { id, input } => {
                let response = cart::update_price(&mut self.state, &id, &input);
                self.report(&response)?;
            }
            Action::Remove(id) => {
                let response = cart::remove_from_cart(&mut self.state, &id);
                self.report(&response)?;
            }
            Action::Customer(field, value) => {
                let response = set_customer_field(&mut self.state, field, &value);
                self.report(&response)?;
            }
            Action::Cart => {
                let response = cart::get_cart(&self.state);
                self.print_cart(&response)?;
            }
            Action::Json => writeln!(self.out, "{}", show_json(&self.state))?,
            Action::Qr => writeln!(self.out, "{}", show_qr(&self.state)?)?,
            Action::Copy => {
                copy_json(&self.state, Arc::clone(&self.clipboard)).await?;
                writeln!(self.out, "Copied payload to clipboard")?;
            }
            Action::Download(dir) => {
                let dir = dir.unwrap_or_else(|| self.config.export_dir());
                let path = download_svg(&self.state, &dir)?;
                writeln!(self.out, "Saved {}", path.display())?;
            }
            Action::Clear => {
                let response = cart::clear_session(&mut self.state);
                self.report(&response)?;
            }
        }
        Ok(())
    }

    /// Accepted mutations redraw the cart; ignored ones print nothing.
    fn report(&mut self, response: &CartResponse) -> Result<(), ApiError> {
        if response.applied {
            self.print_cart(response)?;
        }
        Ok(())
    }

    fn print_products(&mut self, filter: Option<&str>) -> Result<(), ApiError> {
        for product in list_products(&self.state, filter)? {
            writeln!(
                self.out,
                "  {:<6} {:<20} {:<8} {:>10}",
                product.id,
                product.name,
                product.category,
                self.config.format_money(product.price)
            )?;
        }
        Ok(())
    }

    fn print_cart(&mut self, response: &CartResponse) -> Result<(), ApiError> {
        if response.items.is_empty() {
            writeln!(self.out, "  (cart is empty)")?;
        }
        for line in &response.items {
            writeln!(
                self.out,
                "  {:<6} {:<20} {:>3} x {:>10} = {:>10}",
                line.id,
                line.name,
                line.quantity,
                self.config.format_money(line.price),
                self.config.format_money(line.subtotal())
            )?;
        }
        writeln!(
            self.out,
            "  Total: {} ({} items)",
            self.config.format_money(response.totals.total),
            response.totals.total_quantity
        )?;

        if let Some(reason) = &response.symbol_error {
            writeln!(self.out, "! QR code unavailable: {}", reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use qrx_export::MemoryClipboard;
    use std::io::Cursor;

    async fn run_script(script: &str, clipboard: Arc<dyn ClipboardSink>) -> (String, SessionState) {
        let config = ShopConfig::default();
        let mut out = Vec::new();
        let mut repl = Repl::new(&config, clipboard, &mut out);
        repl.run(Cursor::new(script.to_string())).await.unwrap();
        let state = std::mem::take(&mut repl.state);
        drop(repl);
        (String::from_utf8(out).unwrap(), state)
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(Action::parse("  ").unwrap(), Action::Empty);
        assert_eq!(Action::parse("ADD A-001").unwrap(), Action::Add("A-001".to_string()));
        assert_eq!(
            Action::parse("qty A-001").unwrap(),
            Action::Quantity {
                id: "A-001".to_string(),
                input: String::new()
            }
        );
        assert_eq!(
            Action::parse("price S-002  299.50").unwrap(),
            Action::Price {
                id: "S-002".to_string(),
                input: "299.50".to_string()
            }
        );
        assert_eq!(
            Action::parse("name Ada  Lovelace").unwrap(),
            Action::Customer(CustomerField::Name, "Ada  Lovelace".to_string())
        );
        assert_eq!(Action::parse("email").unwrap(), Action::Customer(CustomerField::Email, String::new()));
        assert_eq!(Action::parse("download").unwrap(), Action::Download(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Action::parse("add").unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(Action::parse("checkout").unwrap_err().code, ErrorCode::UnknownCommand);
    }

    #[tokio::test]
    async fn test_scenario_session() {
        let (output, state) = run_script(
            "add A-001\nadd S-002\nadd S-002\ncart\nquit\nadd X-001\n",
            Arc::new(MemoryClipboard::new()),
        )
        .await;

        assert!(output.starts_with("Samio Shop: type 'help' for commands"));
        assert!(output.contains("Total: $1697.00 (3 items)"));
        assert_eq!(state.session().cart().len(), 2);
        assert!(state.json().contains("\"total\": 1697"));
    }

    #[tokio::test]
    async fn test_rejected_edits_are_silent() {
        let (output, state) = run_script("add A-001\nprice A-001 -5\nqty A-001 abc\n", Arc::new(MemoryClipboard::new())).await;

        assert_eq!(output.matches("Total:").count(), 1);
        assert!(!output.contains("! "));
        let line = state.session().cart().line("A-001").unwrap();
        assert_eq!(line.price, qrx_core::Money::from_major(999));
        assert_eq!(line.quantity, 1);
    }

    #[tokio::test]
    async fn test_oversized_amounts_are_refused() {
        let (output, state) = run_script(
            "add A-001\nadd A-002\nqty A-001 1000000000000000\nprice A-001 92233720368547758\ncart\n",
            Arc::new(MemoryClipboard::new()),
        )
        .await;

        assert_eq!(output.matches("Total:").count(), 3);
        assert_eq!(output.matches("Total: $2198.00 (2 items)").count(), 2);
        assert!(!output.contains("! "));
        let line = state.session().cart().line("A-001").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.price, qrx_core::Money::from_major(999));
        assert!(state.json().contains("\"total\": 2198"));
    }

    #[tokio::test]
    async fn test_notices_keep_session_alive() {
        let (output, state) = run_script("add Z-000\nfly\nadd A-003\n", Arc::new(MemoryClipboard::new())).await;

        assert!(output.contains("! Product not found: Z-000"));
        assert!(output.contains("! Unknown command: 'fly'"));
        assert_eq!(state.session().cart().len(), 1);
    }

    #[tokio::test]
    async fn test_copy_and_download() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Arc::new(MemoryClipboard::new());
        let script = format!("add X-002\nname Ada\ncopy\ndownload {}\n", dir.path().display());

        let (output, state) = run_script(&script, clipboard.clone()).await;

        assert!(output.contains("Copied payload to clipboard"));
        assert!(output.contains("Saved "));
        assert_eq!(clipboard.contents().as_deref(), Some(state.json()));

        let svg = std::fs::read_to_string(dir.path().join("qr-code.svg")).unwrap();
        assert_eq!(svg, state.symbol().unwrap().svg());
    }

    #[tokio::test]
    async fn test_clear_keeps_filter() {
        let (output, state) = run_script(
            "filter apple\nadd A-002\nemail ada@example.com\nclear\n",
            Arc::new(MemoryClipboard::new()),
        )
        .await;

        assert!(output.contains("Showing: Apple"));
        assert!(output.contains("(cart is empty)"));
        assert!(state.session().cart().is_empty());
        assert!(state.session().customer().is_empty());
        assert_eq!(state.session().filter().to_string(), "Apple");
    }
}
