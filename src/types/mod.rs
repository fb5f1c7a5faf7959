//! Core types shared across the SDK

use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels attached to every [`NormalizedError`](crate::error::NormalizedError)
/// raised by the façade
///
/// The label names the operation that failed, not the shape of the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RegisterWithEmail,
    LoginWithEmail,
    GoogleProfile,
    GoogleSocialRegister,
    GoogleSocialLogin,
    AuthenticateSessionTicket,
    GetPlayerStatistics,
    UpdatePlayerStatistics,
    AptosFaucetFund,
    AptosMintToken,
    AptosAccount,
}

impl ErrorKind {
    /// Every label, in declaration order
    pub const ALL: [ErrorKind; 11] = [
        ErrorKind::RegisterWithEmail,
        ErrorKind::LoginWithEmail,
        ErrorKind::GoogleProfile,
        ErrorKind::GoogleSocialRegister,
        ErrorKind::GoogleSocialLogin,
        ErrorKind::AuthenticateSessionTicket,
        ErrorKind::GetPlayerStatistics,
        ErrorKind::UpdatePlayerStatistics,
        ErrorKind::AptosFaucetFund,
        ErrorKind::AptosMintToken,
        ErrorKind::AptosAccount,
    ];

    /// The wire label, e.g. `PLAYFAB_LOGIN_WITH_EMAIL_ERROR`
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RegisterWithEmail => "PLAYFAB_REGISTER_WITH_EMAIL_ERROR",
            ErrorKind::LoginWithEmail => "PLAYFAB_LOGIN_WITH_EMAIL_ERROR",
            ErrorKind::GoogleProfile => "GOOGLE_PROFILE_ERROR",
            ErrorKind::GoogleSocialRegister => "PLAYFAB_GOOGLE_SOCIAL_REGISTER_ERROR",
            ErrorKind::GoogleSocialLogin => "PLAYFAB_GOOGLE_SOCIAL_LOGIN_ERROR",
            ErrorKind::AuthenticateSessionTicket => "PLAYFAB_AUTHENTICATE_SESSION_TICKET_ERROR",
            ErrorKind::GetPlayerStatistics => "PLAYFAB_GET_PLAYER_STATISTICS_ERROR",
            ErrorKind::UpdatePlayerStatistics => "PLAYFAB_UPDATE_PLAYER_STATISTICS_ERROR",
            ErrorKind::AptosFaucetFund => "APTOS_FAUCET_FUND_ERROR",
            ErrorKind::AptosMintToken => "APTOS_MINT_TOKEN_ERROR",
            ErrorKind::AptosAccount => "APTOS_ACCOUNT_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorKind> for String {
    fn from(kind: ErrorKind) -> Self {
        kind.as_str().to_string()
    }
}

impl PartialEq<ErrorKind> for String {
    fn eq(&self, other: &ErrorKind) -> bool {
        self == other.as_str()
    }
}

/// A statistic name pinned to a version, as PlayFab expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticVersion {
    pub statistic_name: String,
    pub version: u32,
}

impl StatisticVersion {
    pub fn new(statistic_name: impl Into<String>, version: u32) -> Self {
        StatisticVersion {
            statistic_name: statistic_name.into(),
            version,
        }
    }
}

/// A new value for one player statistic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticUpdate {
    pub statistic_name: String,
    pub value: i64,
    /// Target version; omitted means the current one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl StatisticUpdate {
    pub fn new(statistic_name: impl Into<String>, value: i64) -> Self {
        StatisticUpdate {
            statistic_name: statistic_name.into(),
            value,
            version: None,
        }
    }

    /// Pin the update to a statistic version
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }
}
