//! PlayFab REST request bodies and response envelope
//!
//! PlayFab wraps every successful answer as `{ code, status, data }` and every
//! failure as `{ code, status, error, errorCode, errorMessage }`. Request
//! bodies use PascalCase field names.

use crate::error::{AptoPlayError, Result};
use crate::types::{StatisticUpdate, StatisticVersion};
use serde::Serialize;
use serde_json::Value;

pub const REGISTER_PLAYFAB_USER: &str = "/Client/RegisterPlayFabUser";
pub const LOGIN_WITH_EMAIL_ADDRESS: &str = "/Client/LoginWithEmailAddress";
pub const LOGIN_WITH_GOOGLE_ACCOUNT: &str = "/Client/LoginWithGoogleAccount";
pub const AUTHENTICATE_SESSION_TICKET: &str = "/Server/AuthenticateSessionTicket";
pub const GET_PLAYER_STATISTICS: &str = "/Server/GetPlayerStatistics";
pub const UPDATE_PLAYER_STATISTICS: &str = "/Server/UpdatePlayerStatistics";

/// Header carrying the title secret on `/Server/*` calls
pub const SECRET_KEY_HEADER: &str = "X-SecretKey";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterUserRequest {
    pub title_id: String,
    pub email: String,
    pub password: String,
    /// PlayFab username, 3-20 characters
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginWithEmailRequest {
    pub title_id: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginWithGoogleRequest {
    pub title_id: String,
    pub create_account: bool,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticateSessionTicketRequest {
    pub session_ticket: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetPlayerStatisticsRequest {
    pub play_fab_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statistic_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statistic_name_versions: Vec<StatisticVersion>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdatePlayerStatisticsRequest {
    pub play_fab_id: String,
    pub statistics: Vec<StatisticUpdate>,
}

/// Serialize a request body to JSON
pub fn to_body<T: Serialize>(request: &T) -> Result<Value> {
    Ok(serde_json::to_value(request)?)
}

/// Pull the `data` payload out of a success envelope
pub fn take_data(mut envelope: Value) -> Result<Value> {
    match envelope.get_mut("data") {
        Some(data) => Ok(data.take()),
        None => Err(AptoPlayError::InvalidResponse(
            "response envelope has no `data` field".to_string(),
        )),
    }
}
