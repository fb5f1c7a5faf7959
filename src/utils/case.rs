//! Key casing for PlayFab payloads
//!
//! PlayFab answers with PascalCase keys (`PlayFabId`, `SessionTicket`). The
//! SDK hands callers camelCase keys instead. The rule is deliberately narrow:
//! only the first character of each key is lower-cased, so `"ID"` becomes
//! `"iD"`, not `"id"`.
//!
//! Values are rebuilt, never mutated in place. Recursion depth equals the
//! nesting depth of the input; pathologically deep documents will exhaust the
//! stack.

use serde_json::{Map, Value};

/// Lower-case the first character of `key`, leaving the rest untouched
///
/// # Example
///
/// ```rust
/// use aptoplay::utils::case::lower_first;
///
/// assert_eq!(lower_first("PlayFabId"), "playFabId");
/// assert_eq!(lower_first("ID"), "iD");
/// assert_eq!(lower_first(""), "");
/// ```
pub fn lower_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Recursively convert every object key from PascalCase to camelCase
///
/// Objects and arrays are rebuilt with the same shape; scalars and `null`
/// are returned as they are. If two keys of one object collide after
/// conversion, the one iterated last wins. `serde_json::Map` iterates in
/// sorted key order, and upper-case letters sort before lower-case ones, so
/// the key that was already lower-case always wins (`{"id": 2, "Id": 1}`
/// becomes `{"id": 2}`), regardless of the order keys had in the source.
///
/// # Example
///
/// ```rust
/// use aptoplay::utils::case::normalize_keys;
/// use serde_json::json;
///
/// let raw = json!({ "UserName": "a", "Nested": { "PlayFabId": "1" } });
/// assert_eq!(
///     normalize_keys(&raw),
///     json!({ "userName": "a", "nested": { "playFabId": "1" } })
/// );
/// ```
pub fn normalize_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (lower_first(key), normalize_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(normalize_keys).collect()),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

/// Consuming variant of [`normalize_keys`]; moves leaves instead of cloning
pub fn normalize_keys_owned(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (lower_first(&key), normalize_keys_owned(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys_owned).collect()),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("UserName"), "userName");
        assert_eq!(lower_first("userName"), "userName");
        assert_eq!(lower_first("ID"), "iD");
        assert_eq!(lower_first("X"), "x");
        assert_eq!(lower_first("1Up"), "1Up");
        assert_eq!(lower_first("_Private"), "_Private");
        assert_eq!(lower_first("Émile"), "émile");
    }

    #[test]
    fn test_flat_object() {
        let input = json!({ "PlayFabId": "A1B2", "NewlyCreated": true, "Count": 3, "Missing": null });
        let output = normalize_keys(&input);

        assert_eq!(
            output,
            json!({ "playFabId": "A1B2", "newlyCreated": true, "count": 3, "missing": null })
        );
        assert_eq!(output.as_object().map(Map::len), input.as_object().map(Map::len));
    }

    #[test]
    fn test_nested_object_and_arrays() {
        let input = json!({
            "SessionTicket": "T",
            "EntityToken": { "EntityToken": "E", "Entity": { "Id": "1", "Type": "title_player_account" } },
            "Statistics": [
                { "StatisticName": "Score", "Value": 10, "Version": 0 },
                { "StatisticName": "Kills", "Value": 2, "Version": 1 },
            ],
            "Tags": ["Alpha", "Beta"],
        });

        let expected = json!({
            "sessionTicket": "T",
            "entityToken": { "entityToken": "E", "entity": { "id": "1", "type": "title_player_account" } },
            "statistics": [
                { "statisticName": "Score", "value": 10, "version": 0 },
                { "statisticName": "Kills", "value": 2, "version": 1 },
            ],
            "tags": ["Alpha", "Beta"],
        });

        assert_eq!(normalize_keys(&input), expected);
        assert_eq!(normalize_keys_owned(input), expected);
    }

    #[test]
    fn test_lossy_single_character_rule() {
        assert_eq!(normalize_keys(&json!({ "ID": 5 })), json!({ "iD": 5 }));
    }

    #[test]
    fn test_scalars_are_identity() {
        for scalar in [json!(null), json!(true), json!(1.5), json!("PascalCase")] {
            assert_eq!(normalize_keys(&scalar), scalar);
        }
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(normalize_keys(&json!({})), json!({}));
        assert_eq!(normalize_keys(&json!([])), json!([]));
        assert_eq!(normalize_keys(&json!({ "Inner": {} })), json!({ "inner": {} }));
    }

    #[test]
    fn test_idempotent() {
        let input = json!({ "A": { "BC": [{ "DeF": 1 }] }, "gh": 2 });
        let once = normalize_keys(&input);
        assert_eq!(normalize_keys(&once), once);
    }

    #[test]
    fn test_input_untouched() {
        let input = json!({ "Outer": { "Inner": [1, { "Deep": "x" }] } });
        let before = input.clone();
        let _ = normalize_keys(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_array_order_preserved() {
        let input = json!([{ "B": 1 }, { "A": 2 }, 3, "Four"]);
        assert_eq!(normalize_keys(&input), json!([{ "b": 1 }, { "a": 2 }, 3, "Four"]));
    }
}
