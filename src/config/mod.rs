//! Client configuration
//!
//! [`ClientConfig`] gathers every endpoint and timeout the SDK touches. It is
//! usually produced by [`ClientBuilder`](crate::client::builder::ClientBuilder),
//! which validates it, and is then handed to the transport and the façade.

use std::time::Duration;

/// Google OAuth2 userinfo endpoint
pub const DEFAULT_GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Aptos devnet full node REST API
pub const DEFAULT_APTOS_NODE_URL: &str = "https://fullnode.devnet.aptoslabs.com/v1";

/// Aptos devnet faucet
pub const DEFAULT_APTOS_FAUCET_URL: &str = "https://faucet.devnet.aptoslabs.com";

/// Aptos testnet full node REST API
pub const TESTNET_APTOS_NODE_URL: &str = "https://fullnode.testnet.aptoslabs.com/v1";

/// Aptos testnet faucet
pub const TESTNET_APTOS_FAUCET_URL: &str = "https://faucet.testnet.aptoslabs.com";

/// PlayFab REST endpoint for a title
pub fn playfab_base_url(title_id: &str) -> String {
    format!("https://{}.playfabapi.com", title_id)
}

/// Settings shared by every request the SDK makes
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// PlayFab title identifier
    pub title_id: String,
    /// PlayFab `X-SecretKey`, required by `/Server/*` endpoints
    pub secret_key: Option<String>,
    /// PlayFab REST endpoint, derived from the title id by default
    pub base_url: String,
    /// Endpoint used to resolve a Google access token to a profile
    pub google_userinfo_url: String,
    /// Aptos full node REST API
    pub aptos_node_url: String,
    /// Aptos faucet used by the default minter
    pub aptos_faucet_url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Emit per-request debug logs
    pub logging: bool,
}

impl ClientConfig {
    /// Configuration for a title with every other field at its default
    pub fn new(title_id: impl Into<String>) -> Self {
        let title_id = title_id.into();
        ClientConfig {
            base_url: playfab_base_url(&title_id),
            title_id,
            secret_key: None,
            google_userinfo_url: DEFAULT_GOOGLE_USERINFO_URL.to_string(),
            aptos_node_url: DEFAULT_APTOS_NODE_URL.to_string(),
            aptos_faucet_url: DEFAULT_APTOS_FAUCET_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("AptoPlay-Rust-SDK/{}", env!("CARGO_PKG_VERSION")),
            logging: false,
        }
    }

    /// Join a PlayFab path (e.g. `/Client/LoginWithEmailAddress`) onto the base URL
    pub fn playfab_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

/// Join `path` onto `base` with exactly one `/` between them
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
