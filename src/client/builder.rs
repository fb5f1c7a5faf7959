//! ClientBuilder for fluent AptoPlay configuration
//!
//! # Examples
//!
//! ```rust
//! use aptoplay::client::ClientBuilder;
//!
//! // Basic client
//! let client = ClientBuilder::new()
//!     .title_id("ABC12")
//!     .secret_key("my-secret-key")
//!     .build()?;
//!
//! // Testnet faucet, tighter timeouts
//! let client = ClientBuilder::testnet("ABC12", "my-secret-key")
//!     .request_timeout(15)
//!     .logging(true)
//!     .build()?;
//! # Ok::<(), aptoplay::AptoPlayError>(())
//! ```

use crate::chain::TokenMinter;
use crate::client::AptoPlay;
use crate::config::{self, playfab_base_url, ClientConfig};
use crate::error::{AptoPlayError, Result};
use crate::transport::Transport;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating [`AptoPlay`] instances with fluent API
#[derive(Clone, Default)]
pub struct ClientBuilder {
    /// PlayFab title id (required)
    title_id: Option<String>,
    /// PlayFab `X-SecretKey`
    secret_key: Option<String>,
    /// Override for the title's PlayFab endpoint
    base_url: Option<String>,
    google_userinfo_url: Option<String>,
    aptos_node_url: Option<String>,
    aptos_faucet_url: Option<String>,
    /// Connection timeout in seconds
    connection_timeout: Option<u64>,
    /// Request timeout in seconds
    request_timeout: Option<u64>,
    user_agent: Option<String>,
    /// Enable debug logging
    logging: bool,
    /// Custom transport (optional)
    transport: Option<Arc<dyn Transport>>,
    /// Custom minter signing from the system wallet (optional)
    minter: Option<Arc<dyn TokenMinter>>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PlayFab title id
    pub fn title_id<S: Into<String>>(mut self, title_id: S) -> Self {
        self.title_id = Some(title_id.into());
        self
    }

    /// Set the PlayFab secret key used by `/Server/*` endpoints
    pub fn secret_key<S: Into<String>>(mut self, secret_key: S) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Override the PlayFab endpoint (defaults to `https://{title}.playfabapi.com`)
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the Google userinfo endpoint
    pub fn google_userinfo_url<S: Into<String>>(mut self, url: S) -> Self {
        self.google_userinfo_url = Some(url.into());
        self
    }

    /// Override the Aptos full node endpoint
    pub fn aptos_node_url<S: Into<String>>(mut self, url: S) -> Self {
        self.aptos_node_url = Some(url.into());
        self
    }

    /// Override the Aptos faucet endpoint
    pub fn aptos_faucet_url<S: Into<String>>(mut self, url: S) -> Self {
        self.aptos_faucet_url = Some(url.into());
        self
    }

    /// Set the connection timeout in seconds
    pub fn connection_timeout(mut self, timeout_seconds: u64) -> Self {
        self.connection_timeout = Some(timeout_seconds);
        self
    }

    /// Set the request timeout in seconds
    pub fn request_timeout(mut self, timeout_seconds: u64) -> Self {
        self.request_timeout = Some(timeout_seconds);
        self
    }

    /// Override the user agent
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable or disable debug logging
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Use a custom transport instead of the default reqwest one
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Mint through a custom [`TokenMinter`] instead of the faucet
    pub fn minter(mut self, minter: Arc<dyn TokenMinter>) -> Self {
        self.minter = Some(minter);
        self
    }

    /// Validate the builder configuration
    fn validate(&self) -> Result<()> {
        let title_id = self.title_id.as_deref().unwrap_or_default();
        if title_id.trim().is_empty() {
            return Err(AptoPlayError::ConfigurationError("A title id must be specified".into()));
        }
        if !title_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AptoPlayError::ConfigurationError(format!(
                "Invalid title id: {}",
                title_id
            )));
        }

        if let Some(secret_key) = &self.secret_key {
            if secret_key.trim().is_empty() {
                return Err(AptoPlayError::ConfigurationError("Secret key must not be empty".into()));
            }
        }

        let urls = [
            &self.base_url,
            &self.google_userinfo_url,
            &self.aptos_node_url,
            &self.aptos_faucet_url,
        ];
        for url in urls.into_iter().flatten() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AptoPlayError::ConfigurationError(format!("Invalid URL format: {}", url)));
            }
        }

        if let Some(timeout) = self.connection_timeout {
            if timeout == 0 || timeout > 300 {
                return Err(AptoPlayError::ConfigurationError(
                    "Connection timeout must be between 1 and 300 seconds".into(),
                ));
            }
        }

        if let Some(timeout) = self.request_timeout {
            if timeout == 0 || timeout > 600 {
                return Err(AptoPlayError::ConfigurationError(
                    "Request timeout must be between 1 and 600 seconds".into(),
                ));
            }
        }

        Ok(())
    }

    /// Resolve the validated settings into a [`ClientConfig`]
    pub fn config(&self) -> Result<ClientConfig> {
        self.validate()?;

        let title_id = self.title_id.clone().unwrap_or_default();
        let mut config = ClientConfig::new(title_id);
        config.secret_key = self.secret_key.clone();
        config.base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| playfab_base_url(&config.title_id));
        if let Some(url) = &self.google_userinfo_url {
            config.google_userinfo_url = url.clone();
        }
        if let Some(url) = &self.aptos_node_url {
            config.aptos_node_url = url.clone();
        }
        if let Some(url) = &self.aptos_faucet_url {
            config.aptos_faucet_url = url.clone();
        }
        if let Some(timeout) = self.connection_timeout {
            config.connect_timeout = Duration::from_secs(timeout);
        }
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = Duration::from_secs(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config.logging = self.logging;

        Ok(config)
    }

    /// Build the client with the configured settings
    pub fn build(self) -> Result<AptoPlay> {
        let config = self.config()?;
        AptoPlay::from_parts(config, self.transport, self.minter)
    }
}

/// Type-safe configuration presets for common use cases
impl ClientBuilder {
    /// Title on Aptos devnet
    pub fn devnet<S: Into<String>>(title_id: S, secret_key: S) -> Self {
        Self::new()
            .title_id(title_id)
            .secret_key(secret_key)
            .aptos_node_url(config::DEFAULT_APTOS_NODE_URL)
            .aptos_faucet_url(config::DEFAULT_APTOS_FAUCET_URL)
            .connection_timeout(10)
            .request_timeout(30)
    }

    /// Title on Aptos testnet
    pub fn testnet<S: Into<String>>(title_id: S, secret_key: S) -> Self {
        Self::new()
            .title_id(title_id)
            .secret_key(secret_key)
            .aptos_node_url(config::TESTNET_APTOS_NODE_URL)
            .aptos_faucet_url(config::TESTNET_APTOS_FAUCET_URL)
            .connection_timeout(10)
            .request_timeout(60)
    }

    /// Client-API-only configuration without a secret key
    pub fn minimal<S: Into<String>>(title_id: S) -> Self {
        Self::new().title_id(title_id).logging(false)
    }
}
