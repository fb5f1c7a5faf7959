//! Google profile lookup for social registration
//!
//! The access token is forwarded to Google's userinfo endpoint as-is; its
//! validity is Google's call, not ours.

use crate::error::Fault;
use crate::transport::{HttpRequest, Transport};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Subset of the OpenID Connect userinfo claims the SDK reads
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleProfile {
    pub email: String,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
}

#[derive(Clone)]
pub struct GoogleProfileClient {
    transport: Arc<dyn Transport>,
    userinfo_url: String,
}

impl GoogleProfileClient {
    pub fn new(transport: Arc<dyn Transport>, userinfo_url: impl Into<String>) -> Self {
        GoogleProfileClient {
            transport,
            userinfo_url: userinfo_url.into(),
        }
    }

    /// Resolve an access token to the account's profile
    pub async fn profile(&self, access_token: &str) -> Result<GoogleProfile, Fault> {
        let request = HttpRequest::get(&self.userinfo_url).query("access_token", access_token);
        let body = self.transport.send(request).await?;
        parse_profile(body)
    }

    /// Resolve an access token to the account's email address
    pub async fn email(&self, access_token: &str) -> Result<String, Fault> {
        Ok(self.profile(access_token).await?.email)
    }
}

fn parse_profile(body: Value) -> Result<GoogleProfile, Fault> {
    match serde_json::from_value::<GoogleProfile>(body.clone()) {
        Ok(profile) if !profile.email.is_empty() => Ok(profile),
        Ok(_) => Err(Fault::Opaque(json!({
            "message": "Google profile has an empty email",
            "profile": body,
        }))),
        Err(e) => Err(Fault::Opaque(json!({
            "message": format!("Google profile is missing an email: {}", e),
            "profile": body,
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let profile = parse_profile(json!({
            "sub": "1090",
            "email": "player@gmail.com",
            "email_verified": true,
            "name": "Player One",
        }))
        .unwrap();

        assert_eq!(profile.email, "player@gmail.com");
        assert_eq!(profile.email_verified, Some(true));
        assert_eq!(profile.picture, None);
    }

    #[test]
    fn test_parse_profile_without_email() {
        let fault = parse_profile(json!({ "sub": "1090" })).unwrap_err();
        assert!(fault
            .message()
            .is_some_and(|m| m.starts_with("Google profile is missing an email")));

        let fault = parse_profile(json!({ "email": "" })).unwrap_err();
        assert_eq!(fault.message(), Some("Google profile has an empty email"));
    }
}
