//! AptoPlay client implementation
//!
//! [`AptoPlay`] is the SDK façade. Each method performs one or two HTTP calls,
//! returns PlayFab's `data` payload with camelCase keys, and turns every
//! failure into a [`NormalizedError`] labelled with the method's
//! [`ErrorKind`].

pub mod builder;

use crate::chain::{AccountAddress, AptosFaucet, AptosNode, TokenMinter};
use crate::config::ClientConfig;
use crate::error::{AptoPlayError, Fault, NormalizeResult, NormalizedError, SdkResult};
use crate::google::GoogleProfileClient;
use crate::playfab::{self, SECRET_KEY_HEADER};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::types::{ErrorKind, StatisticUpdate, StatisticVersion};
use crate::utils::normalize_keys_owned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

pub use builder::ClientBuilder;

/// Main AptoPlay client
///
/// Cheap to clone; clones share the same transport and minter.
///
/// # Examples
///
/// ```rust,no_run
/// use aptoplay::AptoPlay;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AptoPlay::new("ABC12", "SECRET")?;
/// let session = client.login("player@example.com", "hunter22").await?;
/// println!("{}", session["playFabId"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AptoPlay {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    google: GoogleProfileClient,
    faucet: AptosFaucet,
    node: AptosNode,
    minter: Arc<dyn TokenMinter>,
}

impl AptoPlay {
    /// Create a client for a PlayFab title with default endpoints
    pub fn new(title_id: impl Into<String>, secret_key: impl Into<String>) -> crate::error::Result<Self> {
        ClientBuilder::new().title_id(title_id).secret_key(secret_key).build()
    }

    /// Start a [`ClientBuilder`]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Assemble a client from a validated configuration
    pub(crate) fn from_parts(
        config: ClientConfig,
        transport: Option<Arc<dyn Transport>>,
        minter: Option<Arc<dyn TokenMinter>>,
    ) -> crate::error::Result<Self> {
        let transport: Arc<dyn Transport> = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };

        let google = GoogleProfileClient::new(transport.clone(), config.google_userinfo_url.clone());
        let faucet = AptosFaucet::new(transport.clone(), config.aptos_faucet_url.clone());
        let node = AptosNode::new(transport.clone(), config.aptos_node_url.clone());
        let minter = minter.unwrap_or_else(|| Arc::new(faucet.clone()));

        Ok(AptoPlay {
            config: Arc::new(config),
            transport,
            google,
            faucet,
            node,
            minter,
        })
    }

    /// PlayFab title id
    pub fn title_id(&self) -> &str {
        &self.config.title_id
    }

    /// PlayFab `X-SecretKey`, if configured
    pub fn secret_key(&self) -> Option<&str> {
        self.config.secret_key.as_deref()
    }

    /// PlayFab REST endpoint
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Resolved client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register a PlayFab user with email and password
    ///
    /// Without a `username`, the current time in milliseconds is used.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> SdkResult<Value> {
        let kind = ErrorKind::RegisterWithEmail;
        require(kind, "email", email)?;
        require(kind, "password", password)?;

        let username = username
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().to_string());

        let body = playfab::to_body(&playfab::RegisterUserRequest {
            title_id: self.config.title_id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            username,
        })
        .or_normalize(kind.as_str())?;

        self.call_playfab(kind, playfab::REGISTER_PLAYFAB_USER, body, false).await
    }

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> SdkResult<Value> {
        let kind = ErrorKind::LoginWithEmail;
        require(kind, "email", email)?;
        require(kind, "password", password)?;

        let body = playfab::to_body(&playfab::LoginWithEmailRequest {
            title_id: self.config.title_id.clone(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .or_normalize(kind.as_str())?;

        self.call_playfab(kind, playfab::LOGIN_WITH_EMAIL_ADDRESS, body, false).await
    }

    /// Register (or log in) with a Google account
    ///
    /// The account's email is looked up first and merged into the returned
    /// data under `email`.
    pub async fn register_with_google_account(&self, access_token: &str) -> SdkResult<Value> {
        require(ErrorKind::GoogleProfile, "access token", access_token)?;

        let email = self
            .google
            .email(access_token)
            .await
            .or_normalize(ErrorKind::GoogleProfile.as_str())
            .map_err(report)?;

        let kind = ErrorKind::GoogleSocialRegister;
        let data = self.login_with_google(kind, access_token, true).await?;
        let mut merged = match data {
            Value::Object(map) => map,
            other => {
                let cause = Fault::Opaque(json!({
                    "message": AptoPlayError::InvalidResponse("Google login data is not an object".into()).to_string(),
                    "data": other,
                }));
                return Err(report(NormalizedError::normalize(kind, Some(cause))));
            }
        };
        merged.insert("email".to_string(), Value::String(email));

        Ok(normalize_keys_owned(Value::Object(merged)))
    }

    /// Log in with a Google account that is already linked
    pub async fn login_with_google_account(&self, access_token: &str) -> SdkResult<Value> {
        let kind = ErrorKind::GoogleSocialLogin;
        require(kind, "access token", access_token)?;

        let data = self.login_with_google(kind, access_token, false).await?;
        Ok(normalize_keys_owned(data))
    }

    /// Validate a session ticket issued by a client login
    ///
    /// Requires the secret key.
    pub async fn validate_session(&self, session_ticket: &str) -> SdkResult<Value> {
        let kind = ErrorKind::AuthenticateSessionTicket;
        require(kind, "session ticket", session_ticket)?;

        let body = playfab::to_body(&playfab::AuthenticateSessionTicketRequest {
            session_ticket: session_ticket.to_string(),
        })
        .or_normalize(kind.as_str())?;

        self.call_playfab(kind, playfab::AUTHENTICATE_SESSION_TICKET, body, true).await
    }

    /// Fetch a player's statistics
    ///
    /// Empty `statistic_names` and `versions` fetch every statistic.
    /// Requires the secret key.
    pub async fn get_player_statistics(
        &self,
        playfab_id: &str,
        statistic_names: &[&str],
        versions: &[StatisticVersion],
    ) -> SdkResult<Value> {
        let kind = ErrorKind::GetPlayerStatistics;
        require(kind, "PlayFab id", playfab_id)?;

        let body = playfab::to_body(&playfab::GetPlayerStatisticsRequest {
            play_fab_id: playfab_id.to_string(),
            statistic_names: statistic_names.iter().map(|name| name.to_string()).collect(),
            statistic_name_versions: versions.to_vec(),
        })
        .or_normalize(kind.as_str())?;

        self.call_playfab(kind, playfab::GET_PLAYER_STATISTICS, body, true).await
    }

    /// Write new values for a player's statistics
    ///
    /// Requires the secret key.
    pub async fn update_player_statistics(
        &self,
        playfab_id: &str,
        updates: &[StatisticUpdate],
    ) -> SdkResult<Value> {
        let kind = ErrorKind::UpdatePlayerStatistics;
        require(kind, "PlayFab id", playfab_id)?;
        if updates.is_empty() {
            return Err(invalid(kind, "at least one statistic update is required"));
        }

        let body = playfab::to_body(&playfab::UpdatePlayerStatisticsRequest {
            play_fab_id: playfab_id.to_string(),
            statistics: updates.to_vec(),
        })
        .or_normalize(kind.as_str())?;

        self.call_playfab(kind, playfab::UPDATE_PLAYER_STATISTICS, body, true).await
    }

    /// Mint `amount` base units to `address` through the configured minter
    ///
    /// Returns the submitted transaction hashes.
    pub async fn mint_tokens(&self, address: &str, amount: u64) -> SdkResult<Vec<String>> {
        let kind = ErrorKind::AptosMintToken;
        let address = parse_mint_target(kind, address, amount)?;

        self.minter
            .mint(&address, amount)
            .await
            .or_normalize(kind.as_str())
            .map_err(report)
    }

    /// Fund `address` with `amount` octas from the faucet
    pub async fn fund_account(&self, address: &str, amount: u64) -> SdkResult<Vec<String>> {
        let kind = ErrorKind::AptosFaucetFund;
        let address = parse_mint_target(kind, address, amount)?;

        self.faucet
            .fund_account(&address, amount)
            .await
            .or_normalize(kind.as_str())
            .map_err(report)
    }

    /// Fetch on-chain account data for `address`
    pub async fn get_account(&self, address: &str) -> SdkResult<Value> {
        let kind = ErrorKind::AptosAccount;
        let address = AccountAddress::parse(address).or_normalize(kind.as_str())?;

        self.node
            .account(&address)
            .await
            .or_normalize(kind.as_str())
            .map_err(report)
    }

    async fn login_with_google(&self, kind: ErrorKind, access_token: &str, create_account: bool) -> SdkResult<Value> {
        let body = playfab::to_body(&playfab::LoginWithGoogleRequest {
            title_id: self.config.title_id.clone(),
            create_account,
            access_token: access_token.to_string(),
        })
        .or_normalize(kind.as_str())?;

        self.send_playfab(kind, playfab::LOGIN_WITH_GOOGLE_ACCOUNT, body, false).await
    }

    /// POST to PlayFab and return the camelCased `data` payload
    async fn call_playfab(&self, kind: ErrorKind, path: &str, body: Value, server: bool) -> SdkResult<Value> {
        let data = self.send_playfab(kind, path, body, server).await?;
        Ok(normalize_keys_owned(data))
    }

    /// POST to PlayFab and return the raw `data` payload
    async fn send_playfab(&self, kind: ErrorKind, path: &str, body: Value, server: bool) -> SdkResult<Value> {
        let mut request = HttpRequest::post(self.config.playfab_url(path), body);

        if server {
            let secret_key = self
                .config
                .secret_key
                .as_deref()
                .ok_or(AptoPlayError::MissingSecretKey)
                .or_normalize(kind.as_str())?;
            request = request.header(SECRET_KEY_HEADER, secret_key);
        }

        if self.config.logging {
            debug!(kind = %kind, path, "calling PlayFab");
        }

        let envelope = self
            .transport
            .send(request)
            .await
            .or_normalize(kind.as_str())
            .map_err(report)?;

        playfab::take_data(envelope).or_normalize(kind.as_str()).map_err(report)
    }
}

fn report(error: NormalizedError) -> NormalizedError {
    warn!(
        kind = %error.kind,
        code = ?error.transport_code(),
        message = %error.message,
        "request failed"
    );
    error
}

fn invalid(kind: ErrorKind, message: &str) -> NormalizedError {
    NormalizedError::normalize(kind, Some(AptoPlayError::invalid_input(message).into()))
}

fn require(kind: ErrorKind, field: &str, value: &str) -> SdkResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(kind, &format!("{} must not be empty", field)));
    }
    Ok(())
}

fn parse_mint_target(kind: ErrorKind, address: &str, amount: u64) -> SdkResult<AccountAddress> {
    if amount == 0 {
        return Err(invalid(kind, "amount must be greater than zero"));
    }
    AccountAddress::parse(address).or_normalize(kind.as_str())
}
