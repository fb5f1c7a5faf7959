//! Aptos token minting
//!
//! Minting from a system-controlled wallet needs a signer, which this crate
//! does not implement. The [`TokenMinter`] trait is the seam: plug in a signer
//! backed by an Aptos client library, or use [`AptosFaucet`], which asks a
//! devnet/testnet faucet to mint instead.

use crate::config::join_url;
use crate::error::{AptoPlayError, Fault, Result};
use crate::transport::{HttpRequest, Transport};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// A validated Aptos account address (`0x` followed by 1-64 hex digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parse and validate an address, lower-casing the hex digits
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| AptoPlayError::invalid_input(format!("address must start with 0x: {}", input)))?;

        if hex.is_empty() || hex.len() > 64 {
            return Err(AptoPlayError::invalid_input(format!(
                "address must have 1 to 64 hex digits: {}",
                input
            )));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AptoPlayError::invalid_input(format!("address is not hex: {}", input)));
        }

        Ok(AccountAddress(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submits token-mint transactions on behalf of the game
#[async_trait::async_trait]
pub trait TokenMinter: Send + Sync {
    /// Mint `amount` base units to `address`, returning transaction hashes
    async fn mint(&self, address: &AccountAddress, amount: u64) -> std::result::Result<Vec<String>, Fault>;
}

/// Minter that funds accounts through an Aptos faucet
#[derive(Clone)]
pub struct AptosFaucet {
    transport: Arc<dyn Transport>,
    faucet_url: String,
}

impl AptosFaucet {
    pub fn new(transport: Arc<dyn Transport>, faucet_url: impl Into<String>) -> Self {
        AptosFaucet {
            transport,
            faucet_url: faucet_url.into(),
        }
    }

    pub fn faucet_url(&self) -> &str {
        &self.faucet_url
    }

    /// Ask the faucet to fund `address` with `amount` octas
    pub async fn fund_account(
        &self,
        address: &AccountAddress,
        amount: u64,
    ) -> std::result::Result<Vec<String>, Fault> {
        let request = HttpRequest::post_empty(join_url(&self.faucet_url, "mint"))
            .query("amount", amount.to_string())
            .query("address", address.as_str());

        let body = self.transport.send(request).await?;
        let hashes = parse_hashes(body)?;
        info!(address = %address, amount, transactions = hashes.len(), "faucet funded account");
        Ok(hashes)
    }
}

#[async_trait::async_trait]
impl TokenMinter for AptosFaucet {
    async fn mint(&self, address: &AccountAddress, amount: u64) -> std::result::Result<Vec<String>, Fault> {
        self.fund_account(address, amount).await
    }
}

/// Read-only access to an Aptos full node
#[derive(Clone)]
pub struct AptosNode {
    transport: Arc<dyn Transport>,
    node_url: String,
}

impl AptosNode {
    pub fn new(transport: Arc<dyn Transport>, node_url: impl Into<String>) -> Self {
        AptosNode {
            transport,
            node_url: node_url.into(),
        }
    }

    /// Fetch `/accounts/{address}` (sequence number and authentication key)
    pub async fn account(&self, address: &AccountAddress) -> std::result::Result<Value, Fault> {
        let url = join_url(&self.node_url, &format!("accounts/{}", address));
        self.transport.send(HttpRequest::get(url)).await
    }
}

/// Faucets answer with a JSON array of transaction hashes
fn parse_hashes(body: Value) -> std::result::Result<Vec<String>, Fault> {
    let unexpected = |body: &Value| {
        Fault::Opaque(json!({
            "message": "faucet response is not a list of transaction hashes",
            "body": body,
        }))
    };

    match &body {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| unexpected(&body)),
        Value::String(hash) => Ok(vec![hash.clone()]),
        _ => Err(unexpected(&body)),
    }
}
