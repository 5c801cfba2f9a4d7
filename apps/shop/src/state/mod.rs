//! # State Module
//!
//! The two pieces of state the shop runs on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌────────────────────────────────┐  ┌──────────────────────────────┐  │
//! │  │        SessionState            │  │        ShopConfig            │  │
//! │  │                                │  │                              │  │
//! │  │  Session (cart, customer,      │  │  store_name                  │  │
//! │  │           filter)              │  │  currency_symbol             │  │
//! │  │  Payload (latest projection)   │  │  [qr] [export] [clipboard]   │  │
//! │  │  QrExporter (json + symbol)    │  │                              │  │
//! │  └────────────────────────────────┘  └──────────────────────────────┘  │
//! │                                                                         │
//! │  • SessionState: owned by the session loop, mutated one command at a   │
//! │    time, no locking                                                    │
//! │  • ShopConfig: read-only after startup                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ClipboardSettings, ConfigError, ConfigResult, ExportSettings, QrSettings, ShopConfig};
pub use session::SessionState;
