//! # Royalty Checker
//!
//! Verifies that the royalties owed to an NFT's creators were actually paid
//! out in the sale transaction. Transaction and token metadata come from the
//! Helius indexing API.
//!
//! ## Quick Start
//! ```bash
//! API_KEY=<helius key> cargo run --bin royalty-checker -- --signature <SIG>
//! ```

pub mod checker;
pub mod client;
pub mod config;
mod error;
pub mod royalty;
pub mod types;

pub use checker::{check_royalty_payments, signature_or_usage};
pub use client::{HeliusClient, IndexerApi};
pub use config::Config;
pub use error::Error;
pub use royalty::{evaluate, CreatorPayment, RoyaltyReport};
