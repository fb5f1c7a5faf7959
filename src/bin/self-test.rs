/*!
 * AptoPlay Rust SDK Self-Test Program
 *
 * Runs self-contained checks of the SDK without touching the network:
 * - Key casing of PlayFab payloads
 * - Error normalization of transport and plain failures
 * - Façade flows over an in-process replay transport
 *
 * Prints a colored report and a JSON summary. Set
 * APTOPLAY_SELF_TEST_OUTPUT to also write the summary to a file.
 */

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use aptoplay::{
    normalize_keys, ClientBuilder, ErrorKind, Fault, HttpRequest, NormalizedError, Transport,
    TransportFault,
};
use chrono::Utc;
use colored::Colorize;
use serde_json::{json, Value};
use std::fs;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, serde::Serialize)]
struct CheckResult {
    name: String,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct TestResults {
    sdk: String,
    version: String,
    timestamp: String,
    checks: Vec<CheckResult>,
    #[serde(rename = "allPassed")]
    all_passed: bool,
}

struct Logger;

impl Logger {
    fn section(title: &str) {
        println!("\n{}", title.blue().bold());
    }

    fn check(name: &str, passed: bool, error_detail: Option<&str>) {
        let status = if passed { "PASS".green() } else { "FAIL".red() };
        println!("  {}: {}", status, name);
        if let (false, Some(error)) = (passed, error_detail) {
            println!("    {}", error.red());
        }
    }
}

/// Replays canned responses in order
struct ReplayTransport {
    responses: Mutex<Vec<std::result::Result<Value, Fault>>>,
}

impl ReplayTransport {
    fn new(mut responses: Vec<std::result::Result<Value, Fault>>) -> Arc<Self> {
        responses.reverse();
        Arc::new(ReplayTransport {
            responses: Mutex::new(responses),
        })
    }
}

#[async_trait::async_trait]
impl Transport for ReplayTransport {
    async fn send(&self, _request: HttpRequest) -> std::result::Result<Value, Fault> {
        let next = self
            .responses
            .lock()
            .map_err(|_| Fault::message_only("replay transport lock poisoned"))?
            .pop();
        next.unwrap_or_else(|| Err(Fault::message_only("no canned response left")))
    }
}

struct SelfTestRunner {
    results: TestResults,
}

impl SelfTestRunner {
    fn new() -> Self {
        SelfTestRunner {
            results: TestResults {
                sdk: "Rust".to_string(),
                version: aptoplay::VERSION.to_string(),
                timestamp: Utc::now().to_rfc3339(),
                checks: Vec::new(),
                all_passed: false,
            },
        }
    }

    fn record(&mut self, name: &str, outcome: std::result::Result<(), String>) {
        let passed = outcome.is_ok();
        let error = outcome.err();
        Logger::check(name, passed, error.as_deref());
        self.results.checks.push(CheckResult {
            name: name.to_string(),
            passed,
            error,
        });
    }

    fn run_key_casing(&mut self) {
        Logger::section("Key casing");

        let input = json!({ "UserName": "a", "Nested": { "PlayFabId": "1" } });
        let output = normalize_keys(&input);
        self.record(
            "nested PascalCase keys",
            expect_eq(&output, &json!({ "userName": "a", "nested": { "playFabId": "1" } })),
        );

        self.record(
            "single character rule",
            expect_eq(&normalize_keys(&json!({ "ID": 5 })), &json!({ "iD": 5 })),
        );

        self.record("idempotence", expect_eq(&normalize_keys(&output), &output));
    }

    fn run_error_normalization(&mut self) {
        Logger::section("Error normalization");

        let err = NormalizedError::normalize("FOO_ERROR", None);
        self.record(
            "no cause",
            expect_eq(&err.to_json(), &json!({ "kind": "FOO_ERROR", "message": "", "cause": null })),
        );

        let err = NormalizedError::normalize_value("FOO_ERROR", Some(json!({ "message": "boom" })));
        self.record("plain cause keeps message", expect_eq(&json!(err.message), &json!("boom")));

        let fault = TransportFault::from_status(400, Some(json!({ "errorCode": 1000 })));
        let err = NormalizedError::normalize("FOO_ERROR", Some(fault.into()));
        self.record(
            "transport cause copies code and response",
            expect_eq(
                &json!([err.transport_code(), err.api_error_code()]),
                &json!([400, 1000]),
            ),
        );
    }

    async fn run_facade(&mut self) -> Result<()> {
        Logger::section("Façade over replay transport");

        let transport = ReplayTransport::new(vec![
            Ok(json!({ "code": 200, "status": "OK", "data": { "PlayFabId": "F00D", "SessionTicket": "T" } })),
            Err(TransportFault::from_status(400, Some(json!({ "errorCode": 1142 }))).into()),
        ]);
        let client = ClientBuilder::new()
            .title_id("SELFTEST")
            .secret_key("self-test-secret")
            .transport(transport)
            .build()
            .context("Failed to build client")?;

        let outcome = match client.login("player@example.com", "hunter22").await {
            Ok(data) => expect_eq(&data, &json!({ "playFabId": "F00D", "sessionTicket": "T" })),
            Err(err) => Err(err.to_string()),
        };
        self.record("login returns camelCase data", outcome);

        let outcome = match client.login("player@example.com", "wrong").await {
            Ok(data) => Err(format!("expected failure, got {}", data)),
            Err(err) if err.kind == ErrorKind::LoginWithEmail && err.transport_code() == Some(400) => Ok(()),
            Err(err) => Err(format!("unexpected error: {}", err)),
        };
        self.record("login failure is normalized", outcome);

        let outcome = match client.mint_tokens("not-an-address", 1).await {
            Ok(_) => Err("expected invalid address to fail".to_string()),
            Err(err) if err.kind == ErrorKind::AptosMintToken => Ok(()),
            Err(err) => Err(format!("unexpected error: {}", err)),
        };
        self.record("mint validates address", outcome);

        Ok(())
    }

    async fn run_all_tests(&mut self) -> Result<()> {
        println!("{}", format!("AptoPlay Rust SDK self-test v{}", aptoplay::VERSION).bold());

        self.run_key_casing();
        self.run_error_normalization();
        self.run_facade().await?;

        self.results.all_passed = self.results.checks.iter().all(|check| check.passed);

        let summary = serde_json::to_string_pretty(&self.results).context("Failed to serialize results")?;
        println!("\n{}", summary);

        if let Ok(path) = std::env::var("APTOPLAY_SELF_TEST_OUTPUT") {
            fs::write(&path, &summary).with_context(|| format!("Failed to write results to {}", path))?;
            info!(path = %path, "results written");
        }

        if self.results.all_passed {
            println!("\n{}", "All checks passed".green().bold());
            Ok(())
        } else {
            anyhow::bail!("{} check(s) failed", self.results.checks.iter().filter(|c| !c.passed).count())
        }
    }
}

fn expect_eq(actual: &Value, expected: &Value) -> std::result::Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {}, got {}", expected, actual))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut runner = SelfTestRunner::new();

    runner.run_all_tests().await
        .context("Self-test failed")?;

    Ok(())
}
