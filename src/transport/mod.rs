//! HTTP transport for the AptoPlay SDK
//!
//! Every outgoing call goes through the [`Transport`] trait. The production
//! implementation, [`ReqwestTransport`], wraps a pooled `reqwest::Client`.
//! This is also where failures are classified: whatever goes wrong on the
//! wire comes back as a [`Fault`], never as a raw reqwest error.

use crate::config::ClientConfig;
use crate::error::{AptoPlayError, Fault, Result, TransportFault};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// HTTP method of an outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Outgoing request description
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Extra headers, e.g. `X-SecretKey`
    pub headers: Vec<(String, String)>,
    /// Query string parameters
    pub query: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

impl HttpRequest {
    /// POST request with a JSON body
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        HttpRequest {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// POST request without a body
    pub fn post_empty(url: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// GET request
    pub fn get(url: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query string parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a request and decodes the JSON response
///
/// Implementations must report non-success statuses as
/// [`Fault::Transport`] carrying the status code and the decoded body.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<Value, Fault>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> std::result::Result<Value, Fault> {
        (**self).send(request).await
    }
}

/// [`Transport`] backed by a pooled `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: Client,
    logging: bool,
}

impl ReqwestTransport {
    /// Build a transport honoring the timeouts and user agent in `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AptoPlayError::ConfigurationError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ReqwestTransport {
            http_client,
            logging: config.logging,
        })
    }

    /// Wrap an existing client
    pub fn with_client(http_client: Client) -> Self {
        ReqwestTransport {
            http_client,
            logging: false,
        }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<Value, Fault> {
        if self.logging {
            debug!(method = %request.method, url = %request.url, "sending request");
        }

        let mut builder = match request.method {
            Method::Get => self.http_client.get(&request.url),
            Method::Post => self.http_client.post(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| Fault::from(&e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| Fault::from(&e))?;

        if self.logging {
            debug!(status = status.as_u16(), bytes = text.len(), "received response");
        }

        if !status.is_success() {
            return Err(TransportFault::from_status(status.as_u16(), lenient_body(&text)).into());
        }

        decode_body(&text).map_err(|e| {
            let mut fault = TransportFault::from_status(status.as_u16(), Some(Value::String(text.clone())));
            fault.message = format!("Invalid JSON response body: {}", e);
            fault.into()
        })
    }
}

/// Decode a success body; an empty body is `null`
fn decode_body(text: &str) -> serde_json::Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
}

/// Decode an error body, falling back to the raw text
fn lenient_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
