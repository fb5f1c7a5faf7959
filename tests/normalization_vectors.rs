//! Key-casing and error-normalization test vectors
//!
//! Each vector pairs a raw PlayFab-shaped payload with the value callers
//! should see. Properties (idempotence, purity, key count) are checked on
//! every vector.
//!
//! Run: cargo test --test normalization_vectors

use aptoplay::{normalize_keys, ErrorKind, Fault, NormalizeResult, NormalizedError};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};

const KEY_VECTORS: &str = r#"[
  {
    "name": "flat login result",
    "input": { "PlayFabId": "F00D", "SessionTicket": "T", "NewlyCreated": false },
    "expected": { "playFabId": "F00D", "sessionTicket": "T", "newlyCreated": false }
  },
  {
    "name": "nested example",
    "input": { "UserName": "a", "Nested": { "PlayFabId": "1" } },
    "expected": { "userName": "a", "nested": { "playFabId": "1" } }
  },
  {
    "name": "single character rule",
    "input": { "ID": 5 },
    "expected": { "iD": 5 }
  },
  {
    "name": "already camel case",
    "input": { "playFabId": "F00D", "entity": { "id": "1" } },
    "expected": { "playFabId": "F00D", "entity": { "id": "1" } }
  },
  {
    "name": "arrays of objects and scalars",
    "input": { "Statistics": [ { "StatisticName": "Score", "Value": 1 }, 2, "Three", null, [ { "Deep": true } ] ] },
    "expected": { "statistics": [ { "statisticName": "Score", "value": 1 }, 2, "Three", null, [ { "deep": true } ] ] }
  },
  {
    "name": "empty values",
    "input": { "Empty": {}, "None": [], "Null": null, "Blank": "" },
    "expected": { "empty": {}, "none": [], "null": null, "blank": "" }
  },
  {
    "name": "values are never rewritten",
    "input": { "Title": "PascalCaseValue", "Keys": [ "StillPascal" ] },
    "expected": { "title": "PascalCaseValue", "keys": [ "StillPascal" ] }
  },
  {
    "name": "top-level array",
    "input": [ { "A": 1 }, { "B": 2 } ],
    "expected": [ { "a": 1 }, { "b": 2 } ]
  },
  {
    "name": "top-level scalar",
    "input": 42,
    "expected": 42
  }
]"#;

#[derive(Deserialize)]
struct KeyVector {
    name: String,
    input: Value,
    expected: Value,
}

fn key_vectors() -> Vec<KeyVector> {
    serde_json::from_str(KEY_VECTORS).expect("key vectors are valid JSON")
}

fn count_keys(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len() + map.values().map(count_keys).sum::<usize>(),
        Value::Array(items) => items.iter().map(count_keys).sum(),
        _ => 0,
    }
}

#[test]
fn key_vectors_match_expected() {
    for vector in key_vectors() {
        assert_eq!(normalize_keys(&vector.input), vector.expected, "vector: {}", vector.name);
    }
}

#[test]
fn key_normalization_is_idempotent() {
    for vector in key_vectors() {
        let once = normalize_keys(&vector.input);
        assert_eq!(normalize_keys(&once), once, "vector: {}", vector.name);
    }
}

#[test]
fn key_normalization_does_not_touch_input() {
    for vector in key_vectors() {
        let before = vector.input.clone();
        let _ = normalize_keys(&vector.input);
        assert_eq!(vector.input, before, "vector: {}", vector.name);
    }
}

#[test]
fn key_count_is_preserved_without_collisions() {
    for vector in key_vectors() {
        assert_eq!(
            count_keys(&normalize_keys(&vector.input)),
            count_keys(&vector.input),
            "vector: {}",
            vector.name
        );
    }
}

#[test]
fn colliding_keys_collapse_to_one() {
    let output = normalize_keys(&json!({ "Id": 1, "id": 2 }));
    let map = output.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("id"));
}

#[test]
fn colliding_keys_keep_the_lower_case_entry() {
    // Sorted map iteration puts "Id" before "id", whatever the source order
    assert_eq!(normalize_keys(&json!({ "id": 2, "Id": 1 })), json!({ "id": 2 }));
    assert_eq!(normalize_keys(&json!({ "Id": 1, "id": 2 })), json!({ "id": 2 }));
}

#[test]
fn results_normalize_from_outside_the_crate() {
    let failed: Result<(), Fault> = Err(Fault::message_only("signer unavailable"));
    let err = failed.or_normalize("CUSTOM_MINT_ERROR").unwrap_err();
    assert_eq!(err.kind, "CUSTOM_MINT_ERROR");
    assert_eq!(err.message, "signer unavailable");

    let ok: Result<u8, Fault> = Ok(3);
    assert_eq!(ok.or_normalize("CUSTOM_MINT_ERROR").unwrap(), 3);
}

#[test]
fn error_without_cause() {
    let err = NormalizedError::normalize("FOO_ERROR", None);
    assert_eq!(err.to_json(), json!({ "kind": "FOO_ERROR", "message": "", "cause": null }));
}

#[test]
fn error_with_plain_cause() {
    let err = NormalizedError::normalize_value("FOO_ERROR", Some(json!({ "message": "boom" })));
    assert_eq!(err.kind, "FOO_ERROR");
    assert_eq!(err.message, "boom");
    assert_eq!(err.cause, Some(Fault::Opaque(json!({ "message": "boom" }))));
}

#[test]
fn error_with_transport_cause() {
    let raw = json!({
        "message": "Request failed with status code 401",
        "name": "AxiosError",
        "request": { "method": "post" },
        "response": { "status": 401, "data": { "errorCode": 1074, "errorMessage": "NotAuthenticated" } },
    });

    let err = NormalizedError::normalize_value(ErrorKind::AuthenticateSessionTicket, Some(raw.clone()));
    assert_eq!(err.kind, ErrorKind::AuthenticateSessionTicket);
    assert_eq!(err.message, "Request failed with status code 401");
    assert_eq!(err.transport_code(), Some(401));
    assert_eq!(
        err.transport_response(),
        Some(&json!({ "errorCode": 1074, "errorMessage": "NotAuthenticated" }))
    );

    match err.cause {
        Some(Fault::Transport(fault)) => assert_eq!(fault.raw, raw),
        other => panic!("expected transport fault, got {:?}", other),
    }
}

#[test]
fn error_kind_is_verbatim_for_any_label() {
    for label in ["", "lower", "WITH SPACES", "PLAYFAB_REGISTER_WITH_EMAIL_ERROR"] {
        let err = NormalizedError::normalize_value(label, Some(json!({ "response": null })));
        assert_eq!(err.kind, label);
    }
}
