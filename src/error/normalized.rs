//! Normalized failures surfaced by the public façade
//!
//! A failure is classified once, at the transport boundary, into a [`Fault`]:
//! either a [`TransportFault`] (something went wrong on the wire and we may
//! hold a status code and a response body) or an opaque value. The façade then
//! wraps that fault in a [`NormalizedError`] whose `kind` is the label of the
//! operation that failed.

use super::AptoPlayError;
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Result alias returned by every public façade method
pub type SdkResult<T> = std::result::Result<T, NormalizedError>;

/// A failure originating from the HTTP mechanism
///
/// `code`, `response` and `message` are copies pulled out of `raw`, which is
/// kept exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportFault {
    /// HTTP status, when a response came back at all
    pub code: Option<u16>,
    /// Decoded response body
    pub response: Option<Value>,
    /// Human-readable description of the fault
    pub message: String,
    /// The original fault record
    pub raw: Value,
}

/// Classified cause of a failure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "camelCase")]
pub enum Fault {
    /// Transport-layer fault carrying a request/response envelope
    Transport(TransportFault),
    /// Any other cause, retained unmodified
    Opaque(Value),
}

impl TransportFault {
    /// Build a fault for a response that came back with a non-success status
    pub fn from_status(status: u16, body: Option<Value>) -> Self {
        let message = format!("Request failed with status code {}", status);
        let raw = json!({
            "message": message,
            "code": status,
            "response": {
                "status": status,
                "data": body.clone().unwrap_or(Value::Null),
            },
        });

        TransportFault {
            code: Some(status),
            response: body,
            message,
            raw,
        }
    }

    /// Build a fault from a reqwest error (connect failures, timeouts,
    /// undecodable bodies)
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let code = error.status().map(|status| status.as_u16());
        let message = error.to_string();
        let raw = json!({
            "message": message,
            "code": code,
            "request": {
                "url": error.url().map(|url| url.to_string()),
                "timeout": error.is_timeout(),
                "connect": error.is_connect(),
                "decode": error.is_decode(),
            },
        });

        TransportFault {
            code,
            response: None,
            message,
            raw,
        }
    }
}

impl Fault {
    /// Structurally classify an untyped failure value
    ///
    /// An object carrying a `response` or `request` envelope is treated as a
    /// transport fault and its `code`, `response` and `message` are copied out.
    /// Everything else is opaque.
    pub fn classify(value: Value) -> Fault {
        let is_transport = value
            .as_object()
            .is_some_and(|obj| obj.contains_key("response") || obj.contains_key("request"));

        if !is_transport {
            return Fault::Opaque(value);
        }

        let envelope = value.get("response").filter(|response| response.is_object());
        let code = envelope
            .and_then(|response| response.get("status"))
            .and_then(as_status)
            .or_else(|| value.get("code").and_then(as_status))
            .or_else(|| value.get("status").and_then(as_status));

        let response = match value.get("response") {
            None | Some(Value::Null) => None,
            Some(Value::Object(envelope)) => Some(
                envelope
                    .get("data")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(envelope.clone())),
            ),
            Some(other) => Some(other.clone()),
        };

        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Fault::Transport(TransportFault {
            code,
            response,
            message,
            raw: value,
        })
    }

    /// Opaque fault holding just a message
    pub fn message_only(message: impl Into<String>) -> Fault {
        Fault::Opaque(json!({ "message": message.into() }))
    }

    /// The message exposed by this cause, if it has one
    pub fn message(&self) -> Option<&str> {
        match self {
            Fault::Transport(fault) => Some(fault.message.as_str()),
            Fault::Opaque(value) => value.get("message").and_then(Value::as_str),
        }
    }

    /// Check if this fault came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Fault::Transport(_))
    }
}

fn as_status(value: &Value) -> Option<u16> {
    value.as_u64().and_then(|n| u16::try_from(n).ok())
}

impl From<TransportFault> for Fault {
    fn from(fault: TransportFault) -> Self {
        Fault::Transport(fault)
    }
}

impl From<&reqwest::Error> for Fault {
    fn from(error: &reqwest::Error) -> Self {
        Fault::Transport(TransportFault::from_reqwest(error))
    }
}

impl From<AptoPlayError> for Fault {
    fn from(error: AptoPlayError) -> Self {
        let message = error.to_string();
        match error {
            AptoPlayError::Network(_) => Fault::Transport(TransportFault {
                code: None,
                response: None,
                raw: json!({ "message": message, "request": Value::Null }),
                message,
            }),
            _ => Fault::message_only(message),
        }
    }
}

/// The single error shape returned to SDK callers
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{kind}{}", message_suffix(.message))]
pub struct NormalizedError {
    /// Caller-supplied label of the failed operation
    pub kind: String,
    /// Message taken from the cause, empty when there is none
    pub message: String,
    /// The cause, retained for inspection
    pub cause: Option<Fault>,
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {}", message)
    }
}

impl NormalizedError {
    /// Normalize a failure under the given `kind` label
    ///
    /// Never fails. `kind` is copied verbatim and never inferred from the
    /// cause.
    pub fn normalize(kind: impl Into<String>, cause: Option<Fault>) -> Self {
        let message = cause
            .as_ref()
            .and_then(Fault::message)
            .unwrap_or_default()
            .to_string();

        NormalizedError {
            kind: kind.into(),
            message,
            cause,
        }
    }

    /// Normalize an untyped cause, classifying it structurally first
    pub fn normalize_value(kind: impl Into<String>, cause: Option<Value>) -> Self {
        Self::normalize(kind, cause.map(Fault::classify))
    }

    /// Normalized error without a cause
    pub fn bare(kind: impl Into<String>) -> Self {
        Self::normalize(kind, None)
    }

    /// HTTP status copied from a transport fault
    pub fn transport_code(&self) -> Option<u16> {
        match &self.cause {
            Some(Fault::Transport(fault)) => fault.code,
            _ => None,
        }
    }

    /// Response body copied from a transport fault
    pub fn transport_response(&self) -> Option<&Value> {
        match &self.cause {
            Some(Fault::Transport(fault)) => fault.response.as_ref(),
            _ => None,
        }
    }

    /// Check if the cause was a transport-layer fault
    pub fn is_transport(&self) -> bool {
        self.cause.as_ref().is_some_and(Fault::is_transport)
    }

    /// PlayFab's `errorCode` from the response body, when present
    pub fn api_error_code(&self) -> Option<i64> {
        self.transport_response()
            .and_then(|body| body.get("errorCode"))
            .and_then(Value::as_i64)
    }

    /// PlayFab's `errorMessage` from the response body, when present
    pub fn api_error_message(&self) -> Option<&str> {
        self.transport_response()
            .and_then(|body| body.get("errorMessage"))
            .and_then(Value::as_str)
    }

    /// Render as a JSON object for logs and diagnostics
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            let mut map = Map::new();
            map.insert("kind".into(), Value::String(self.kind.clone()));
            map.insert("message".into(), Value::String(self.message.clone()));
            Value::Object(map)
        })
    }
}

/// Normalize the error side of a `Result` under an operation label
pub trait NormalizeResult<T> {
    /// Map the failure through [`NormalizedError::normalize`]
    fn or_normalize(self, kind: &str) -> SdkResult<T>;
}

impl<T> NormalizeResult<T> for std::result::Result<T, Fault> {
    fn or_normalize(self, kind: &str) -> SdkResult<T> {
        self.map_err(|fault| NormalizedError::normalize(kind, Some(fault)))
    }
}

impl<T> NormalizeResult<T> for std::result::Result<T, AptoPlayError> {
    fn or_normalize(self, kind: &str) -> SdkResult<T> {
        self.map_err(|error| NormalizedError::normalize(kind, Some(error.into())))
    }
}
