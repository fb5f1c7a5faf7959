//! AptoPlay Rust SDK
//!
//! A thin client for game backends built on PlayFab accounts and Aptos
//! tokens. The SDK registers and logs players in (email or Google), validates
//! session tickets, reads and writes player statistics, and mints tokens to
//! player accounts.
//!
//! Two rules hold for every façade method:
//!
//! - Successful payloads come back with camelCase keys
//!   ([`utils::normalize_keys`]); PlayFab's `PlayFabId` arrives as `playFabId`.
//! - Failures come back as a [`NormalizedError`] whose `kind` names the
//!   operation that failed and whose `cause` keeps the original fault.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aptoplay::{AptoPlay, ErrorKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AptoPlay::new("ABC12", "title-secret-key")?;
//!
//!     match client.login("player@example.com", "hunter22").await {
//!         Ok(session) => println!("logged in as {}", session["playFabId"]),
//!         Err(err) if err.kind == ErrorKind::LoginWithEmail => {
//!             eprintln!("login failed ({:?}): {}", err.transport_code(), err.message);
//!         }
//!         Err(err) => return Err(err.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

/// SDK Version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod error;
pub mod types;
pub mod utils;

// Transport and configuration
pub mod config;
pub mod transport;

// Backend integrations
pub mod chain;
pub mod google;
pub mod playfab;

// Client module
pub mod client;

// Re-exports for convenience
pub use chain::{AccountAddress, AptosFaucet, AptosNode, TokenMinter};
pub use client::{builder::ClientBuilder, AptoPlay};
pub use config::ClientConfig;
pub use error::{AptoPlayError, Fault, NormalizeResult, NormalizedError, Result, SdkResult, TransportFault};
pub use transport::{HttpRequest, Method, ReqwestTransport, Transport};
pub use types::{ErrorKind, StatisticUpdate, StatisticVersion};
pub use utils::{lower_first, normalize_keys};
