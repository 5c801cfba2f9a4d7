//! # QRX Shop Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QRX Shop                                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Terminal                                    │  │
//! │  │  stdin ──► commands          stdout ◄── cart, JSON, QR preview   │  │
//! │  │                              stderr ◄── tracing logs             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    qrx_shop (library)                            │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► logging, argument parsing, exit code             │  │
//! │  │  lib.rs ─────► config, clipboard, dispatch                      │  │
//! │  │  repl.rs ────► session loop                                     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  qr-code.svg on disk          system clipboard (arboard)         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use qrx_shop::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    qrx_shop::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = qrx_shop::run(cli).await {
        tracing::error!("Command failed: {}", e);
        eprintln!("error: {}", e.message);
        std::process::exit(1);
    }
}
