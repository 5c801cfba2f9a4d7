//! # Command Line
//!
//! ```bash
//! # Interactive session (default)
//! qrx-shop
//!
//! # List Samsung products as JSON
//! qrx-shop catalog --category samsung --json
//!
//! # One-shot order: print the payload, save the QR code, copy the JSON
//! qrx-shop order --add A-001 --add S-002 --add S-002 --name "Ada" --out ./qr --copy
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use qrx_core::CoreError;
use qrx_export::{ClipboardSink, QrRenderer};
use tracing::info;

use crate::commands::cart::add_to_cart;
use crate::commands::catalog::list_products;
use crate::commands::customer::{set_customer_field, CustomerField};
use crate::commands::export::{copy_json, download_svg, show_json};
use crate::error::ApiError;
use crate::state::{SessionState, ShopConfig};

#[derive(Debug, Parser)]
#[command(name = "qrx-shop")]
#[command(author, version, about = "Build a cart and turn it into a QR code")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive session
    Session,

    /// List products
    Catalog {
        /// Category (`all`, `apple`, `samsung`, `xiaomi`)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Build a cart in one go and print its payload
    Order(OrderArgs),
}

#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Product id to add; repeat to add more units
    #[arg(long = "add", value_name = "ID", required = true)]
    pub add: Vec<String>,

    /// Customer name
    #[arg(long)]
    pub name: Option<String>,

    /// Customer email
    #[arg(long)]
    pub email: Option<String>,

    /// Customer phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Directory to save qr-code.svg into
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Copy the payload JSON to the clipboard
    #[arg(long)]
    pub copy: bool,
}

/// `qrx-shop catalog`
pub fn run_catalog<W: Write>(
    config: &ShopConfig,
    category: &str,
    json: bool,
    out: &mut W,
) -> Result<(), ApiError> {
    let state = SessionState::new(QrRenderer::new(config.render_options()));
    let products = list_products(&state, Some(category))?;

    if json {
        let text = serde_json::to_string_pretty(&products).map_err(CoreError::from)?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    for product in products {
        writeln!(
            out,
            "{:<6} {:<20} {:<8} {:>10}",
            product.id,
            product.name,
            product.category,
            config.format_money(product.price)
        )?;
    }
    Ok(())
}

/// `qrx-shop order`: prints the payload JSON on `out`.
pub async fn run_order<W: Write>(
    config: &ShopConfig,
    clipboard: Arc<dyn ClipboardSink>,
    args: OrderArgs,
    out: &mut W,
) -> Result<(), ApiError> {
    let mut state = SessionState::new(QrRenderer::new(config.render_options()));

    for id in &args.add {
        add_to_cart(&mut state, id)?;
    }

    let fields = [
        (CustomerField::Name, args.name),
        (CustomerField::Email, args.email),
        (CustomerField::Phone, args.phone),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            set_customer_field(&mut state, field, &value);
        }
    }

    writeln!(out, "{}", show_json(&state))?;

    if let Some(dir) = &args.out {
        let path = download_svg(&state, dir)?;
        info!(path = %path.display(), "Order QR code saved");
    }

    if args.copy {
        copy_json(&state, clipboard).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use qrx_export::{DisabledClipboard, MemoryClipboard};

    fn order(ids: &[&str]) -> OrderArgs {
        OrderArgs {
            add: ids.iter().map(|id| id.to_string()).collect(),
            name: None,
            email: None,
            phone: None,
            out: None,
            copy: false,
        }
    }

    #[test]
    fn test_cli_parses_order() {
        let cli = Cli::parse_from([
            "qrx-shop", "order", "--add", "A-001", "--add", "S-002", "--name", "Ada", "--copy",
        ]);

        match cli.command {
            Some(Commands::Order(args)) => {
                assert_eq!(args.add, vec!["A-001", "S-002"]);
                assert_eq!(args.name.as_deref(), Some("Ada"));
                assert!(args.copy);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_defaults_to_session() {
        let cli = Cli::parse_from(["qrx-shop", "--config", "/tmp/shop.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/shop.toml")));
    }

    #[test]
    fn test_catalog_json() {
        let mut out = Vec::new();
        run_catalog(&ShopConfig::default(), "samsung", true, &mut out).unwrap();

        let products: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(products.as_array().unwrap().len(), 3);
        assert_eq!(products[0]["id"], "S-001");
        assert_eq!(products[0]["price"], 899);
    }

    #[tokio::test]
    async fn test_order_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut args = order(&["A-001", "S-002", "S-002"]);
        args.email = Some("ada@example.com".to_string());
        args.out = Some(dir.path().to_path_buf());
        args.copy = true;

        let mut out = Vec::new();
        run_order(&ShopConfig::default(), clipboard.clone(), args, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(payload["total"], 1697);
        assert_eq!(payload["items"][1]["quantity"], 2);
        assert_eq!(payload["user"]["name"], serde_json::Value::Null);
        assert_eq!(payload["user"]["email"], "ada@example.com");

        assert_eq!(clipboard.contents().as_deref(), Some(printed.trim_end()));
        assert!(dir.path().join("qr-code.svg").exists());
    }

    #[tokio::test]
    async fn test_order_unknown_product() {
        let mut out = Vec::new();
        let err = run_order(&ShopConfig::default(), Arc::new(MemoryClipboard::new()), order(&["Q-1"]), &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_order_copy_disabled() {
        let mut args = order(&["X-004"]);
        args.copy = true;

        let mut out = Vec::new();
        let err = run_order(&ShopConfig::default(), Arc::new(DisabledClipboard), args, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ClipboardError);
        assert!(!out.is_empty());
    }
}
