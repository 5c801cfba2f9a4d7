//! # Commands Module
//!
//! Everything the session loop and the one-shot subcommands can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product listing, category tab
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── customer.rs  ◄─── Name / email / phone
//! └── export.rs    ◄─── JSON, QR preview, copy, download
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  "price S-002 299"                                                      │
//! │         │                                                               │
//! │         │ (repl.rs parses an Action)                                    │
//! │         ▼                                                               │
//! │  commands::cart::update_price(                                          │
//! │      &mut state,     ◄── the one SessionState                          │
//! │      "S-002",                                                           │
//! │      "299",          ◄── raw text, parsed here                         │
//! │  ) -> CartResponse                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  repl.rs prints totals, or an ApiError as "! message"                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are generic over the QR renderer so tests can swap it out; the
//! binary always runs with `QrRenderer`.

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod export;
