//! # QRX Shop Library
//!
//! The storefront app: a terminal session that builds a cart, keeps its
//! JSON payload and QR code current, and exports both.
//!
//! ## Module Organization
//! ```text
//! qrx_shop/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions, one-shot subcommands
//! ├── repl.rs         ◄─── Interactive session loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── SessionState (session + projection)
//! │   └── config.rs   ◄─── ShopConfig (file + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Product listing
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── customer.rs ◄─── Customer fields
//! │   └── export.rs   ◄─── JSON, QR, copy, download
//! └── error.rs        ◄─── ApiError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod repl;
pub mod state;

use std::io;
use std::sync::Arc;

use qrx_export::{ClipboardSink, DisabledClipboard, SystemClipboard};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::ApiError;
use repl::Repl;
use state::ShopConfig;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn,qrx_core=info,qrx_export=info,qrx_shop=info";

/// Runs the command selected on the command line.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config PATH or platform config dir, then QRX_* env vars        │
/// │                                                                         │
/// │  2. Pick Clipboard ───────────────────────────────────────────────────► │
/// │     • SystemClipboard, or DisabledClipboard when turned off            │
/// │                                                                         │
/// │  3. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • session (default): Repl over stdin/stdout                        │
/// │     • catalog: product table or JSON                                   │
/// │     • order: payload JSON, optional qr-code.svg and copy               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let config = ShopConfig::load(cli.config.as_deref())?;
    let clipboard = clipboard_sink(&config);
    info!(store = %config.store_name, clipboard = config.clipboard.enabled, "Configuration loaded");

    let stdout = io::stdout();
    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let mut repl = Repl::new(&config, clipboard, stdout.lock());
            repl.run(io::stdin().lock()).await
        }
        Commands::Catalog { category, json } => {
            cli::run_catalog(&config, &category, json, &mut stdout.lock())
        }
        Commands::Order(args) => {
            cli::run_order(&config, clipboard, args, &mut stdout.lock()).await
        }
    }
}

/// The clipboard the configuration asks for.
pub fn clipboard_sink(config: &ShopConfig) -> Arc<dyn ClipboardSink> {
    if config.clipboard.enabled {
        Arc::new(SystemClipboard)
    } else {
        Arc::new(DisabledClipboard)
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries only session output and JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=qrx_core=debug` - Show every cart mutation, including ignored ones
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
