//! Shared fixtures for integration tests

#![allow(dead_code)]

use aptoplay::chain::{AccountAddress, TokenMinter};
use aptoplay::{AptoPlay, ClientBuilder, Fault, HttpRequest, Transport, TransportFault};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays canned responses in order and records requests
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, Fault>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, response: Result<Value, Fault>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue a PlayFab success envelope around `data`
    pub fn respond_data(&self, data: Value) -> &Self {
        self.respond(Ok(json!({ "code": 200, "status": "OK", "data": data })))
    }

    /// Queue a PlayFab failure with the given status and body
    pub fn respond_status(&self, status: u16, body: Value) -> &Self {
        self.respond(Err(TransportFault::from_status(status, Some(body)).into()))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request(&self, index: usize) -> HttpRequest {
        self.requests()[index].clone()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, Fault> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Fault::message_only("no canned response left")))
    }
}

/// Minter that records calls and answers with a fixed hash
#[derive(Default)]
pub struct RecordingMinter {
    pub calls: Mutex<Vec<(String, u64)>>,
}

#[async_trait::async_trait]
impl TokenMinter for RecordingMinter {
    async fn mint(&self, address: &AccountAddress, amount: u64) -> Result<Vec<String>, Fault> {
        self.calls.lock().unwrap().push((address.to_string(), amount));
        Ok(vec!["0xfeed".to_string()])
    }
}

pub const TITLE_ID: &str = "ABC12";
pub const SECRET_KEY: &str = "title-secret";

/// Client wired to `transport`, with a secret key
pub fn client(transport: Arc<MockTransport>) -> AptoPlay {
    ClientBuilder::new()
        .title_id(TITLE_ID)
        .secret_key(SECRET_KEY)
        .transport(transport)
        .build()
        .unwrap()
}

/// Client wired to `transport`, without a secret key
pub fn client_without_secret(transport: Arc<MockTransport>) -> AptoPlay {
    ClientBuilder::minimal(TITLE_ID).transport(transport).build().unwrap()
}
