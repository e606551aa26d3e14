//! Integration tests for the JSON entrypoint.
//!
//! - Success: `{"ok": true, "data": {...}}`
//! - Error: `{"ok": false, "error": {"code": "...", "message": "..."}}`

mod common;

use proptest::prelude::*;
use serde_json::{Value, json};
use t9a_core::ffi::{run_json, schema_version, version};

fn call(mode: &str, args: &Value) -> Value {
    let out = run_json(mode, &args.to_string());
    serde_json::from_str(&out).expect("envelope should be valid JSON")
}

fn error_code(envelope: &Value) -> Option<&str> {
    envelope.pointer("/error/code").and_then(Value::as_str)
}

#[test]
fn version_mode_reports_versions() {
    let v = call("version", &json!({}));
    assert_eq!(v["ok"], true);
    assert_eq!(v["data"]["version"], version());
    assert_eq!(v["data"]["schema_version"], schema_version());
}

#[test]
fn invalid_json_is_an_error_envelope() {
    let out = run_json("version", "{ nope");
    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["ok"], false);
    assert_eq!(error_code(&v), Some("invalid_json"));
}

#[test]
fn non_object_arguments_are_rejected() {
    let v = call("summary", &json!([1, 2]));
    assert_eq!(error_code(&v), Some("invalid_settings"));
}

#[test]
fn missing_data_root_has_its_own_code() {
    let v = call("summary", &json!({"data_root": "definitely/not/here"}));
    assert_eq!(error_code(&v), Some("data_root_missing"));
}

#[test]
fn summary_mode_loads_the_data_root() {
    let tmp = common::data_dir();
    let v = call("summary", &json!({"data_root": tmp.path()}));
    assert_eq!(v["ok"], true, "got {v}");
    assert_eq!(v["data"]["num_games"], 3);
    assert_eq!(v["data"]["bounds"]["earliest_start"], "2024-03-02");
}

#[test]
fn filter_mode_applies_the_filter_object() {
    let tmp = common::data_dir();
    let v = call(
        "filter",
        &json!({"data_root": tmp.path(), "filter": {"tournament_type": "teams"}}),
    );
    assert_eq!(v["ok"], true, "got {v}");
    assert_eq!(v["data"]["num_games"], 1);
}

#[test]
fn filter_mode_rejects_inverted_ranges() {
    let tmp = common::data_dir();
    let v = call(
        "filter",
        &json!({
            "data_root": tmp.path(),
            "filter": {"min_tournament_size": 30, "max_tournament_size": 10}
        }),
    );
    assert_eq!(error_code(&v), Some("invalid_settings"));
}

#[test]
fn query_mode_requires_a_query() {
    let tmp = common::data_dir();
    let v = call("query", &json!({"data_root": tmp.path()}));
    assert_eq!(error_code(&v), Some("invalid_settings"));
}

#[test]
fn query_mode_returns_matched_lists() {
    let tmp = common::data_dir();
    let v = call(
        "query",
        &json!({
            "data_root": tmp.path(),
            "query": {
                "faction": "OnG",
                "units": [
                    {"name": "Wolf Riders", "required": ["Bow"]},
                    {"name": "Wolf Riders", "banned": ["Bow"]}
                ]
            }
        }),
    );
    assert_eq!(v["ok"], true, "got {v}");
    assert_eq!(v["data"]["outcome"]["outcome"], "matched");
    assert_eq!(v["data"]["summary"]["lists_found"], 2);
}

#[test]
fn query_mode_accepts_a_faction_name() {
    let tmp = common::data_dir();
    let v = call(
        "query",
        &json!({
            "data_root": tmp.path(),
            "query": {"faction": "orcs and goblins", "units": [{"name": "Giant"}]}
        }),
    );
    assert_eq!(v["ok"], true, "got {v}");
    assert_eq!(v["data"]["outcome"]["outcome"], "matched");
}

#[test]
fn query_mode_reports_no_match() {
    let tmp = common::data_dir();
    let v = call(
        "query",
        &json!({
            "data_root": tmp.path(),
            "query": {"faction": "OnG", "units": [{"name": "Giant", "models": [2, 3]}]}
        }),
    );
    assert_eq!(v["ok"], true, "got {v}");
    assert_eq!(v["data"]["outcome"]["outcome"], "no_match");
    assert!(v["data"].get("summary").is_none());
}

#[test]
fn report_mode_accepts_a_faction_name() {
    let tmp = common::data_dir();
    let v = call(
        "report",
        &json!({"data_root": tmp.path(), "faction": "Orcs and Goblins"}),
    );
    assert_eq!(v["ok"], true, "got {v}");
    assert_eq!(v["data"]["game_wide"]["counts"].as_array().unwrap().len(), 16);
    assert_eq!(v["data"]["faction"]["faction"], "OnG");
}

#[test]
fn unit_mode_needs_faction_and_unit() {
    let tmp = common::data_dir();
    let v = call("unit", &json!({"data_root": tmp.path(), "faction": "OnG"}));
    assert_eq!(error_code(&v), Some("invalid_settings"));

    let v = call(
        "unit",
        &json!({"data_root": tmp.path(), "faction": "XX", "unit": "Giant"}),
    );
    assert_eq!(error_code(&v), Some("unknown_faction"));

    let v = call(
        "unit",
        &json!({"data_root": tmp.path(), "faction": "OnG", "unit": "Giant"}),
    );
    assert_eq!(v["ok"], true, "got {v}");
    assert_eq!(v["data"]["inspection"]["lists_with_unit"], 3);
}

proptest! {
    #[test]
    fn unknown_modes_never_succeed(mode in "[a-z]{1,12}") {
        prop_assume!(!matches!(
            mode.as_str(),
            "version" | "summary" | "filter" | "query" | "report" | "unit"
        ));
        let v = call(&mode, &json!({}));
        prop_assert_eq!(v["ok"].clone(), Value::Bool(false));
        prop_assert_eq!(error_code(&v), Some("unknown_mode"));
    }
}
