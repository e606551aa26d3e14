//! JSON-in, JSON-out entrypoint for embedders and language bindings.
//!
//! ## Response Envelope
//!
//! - Success: `{"ok": true, "data": {...}}`
//! - Error: `{"ok": false, "error": {"code": "...", "message": "...", "details": ...}}`
//!
//! ## Arguments
//!
//! | key         | modes                   | shape                               |
//! |-------------|-------------------------|-------------------------------------|
//! | `data_root` | all but `version`       | string, defaults to `data`          |
//! | `filter`    | all but `version`       | `FilterSettings` object             |
//! | `query`     | `query`                 | `QuerySettings` object, required    |
//! | `faction`   | `report` (opt), `unit`  | faction code or full name           |
//! | `unit`      | `unit`                  | unit name, required                 |
//!
//! Missing keys take their defaults; present keys with the wrong shape are
//! errors, never silently defaulted.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;
use t9a_settings::{DEFAULT_DATA_ROOT, FilterSettings, QuerySettings};
use t9a_types::{Faction, SCHEMA_VERSION};

use crate::error::{ResponseEnvelope, T9aError};
use crate::{
    filter_workflow, load_dataset, query_workflow, report_workflow, summary_workflow,
    unit_workflow,
};

/// Run one operation with JSON arguments and return the JSON envelope.
///
/// Modes: `version`, `summary`, `filter`, `query`, `report`, `unit`.
///
/// ```
/// let out = t9a_core::ffi::run_json("version", "{}");
/// assert!(out.starts_with(r#"{"ok":true"#));
/// ```
pub fn run_json(mode: &str, args_json: &str) -> String {
    match run_json_inner(mode, args_json) {
        Ok(data) => ResponseEnvelope::success(data).to_json(),
        Err(err) => ResponseEnvelope::error(&err).to_json(),
    }
}

/// Crate version as reported by the `version` mode.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn schema_version() -> u32 {
    SCHEMA_VERSION
}

fn run_json_inner(mode: &str, args_json: &str) -> Result<Value, T9aError> {
    let args: Value = serde_json::from_str(args_json)?;
    if !args.is_object() {
        return Err(T9aError::invalid_field("arguments", "a JSON object"));
    }

    if mode == "version" {
        return Ok(serde_json::json!({
            "version": version(),
            "schema_version": schema_version(),
        }));
    }
    if !matches!(mode, "summary" | "filter" | "query" | "report" | "unit") {
        return Err(T9aError::unknown_mode(mode));
    }

    // Parse everything before touching the filesystem.
    let root = PathBuf::from(parse_string(&args, "data_root", DEFAULT_DATA_ROOT)?);
    let filter: FilterSettings = parse_object(&args, "filter")?.unwrap_or_default();
    let value = match mode {
        "summary" => {
            let dataset = load_dataset(&root)?;
            serde_json::to_value(summary_workflow(&dataset, &filter)?)?
        }
        "filter" => {
            let dataset = load_dataset(&root)?;
            serde_json::to_value(filter_workflow(&dataset, &filter)?)?
        }
        "query" => {
            let query: QuerySettings =
                parse_object(&args, "query")?.ok_or_else(|| T9aError::missing_field("query"))?;
            let dataset = load_dataset(&root)?;
            serde_json::to_value(query_workflow(&dataset, &filter, &query)?)?
        }
        "report" => {
            let faction = parse_optional_faction(&args, "faction")?;
            let dataset = load_dataset(&root)?;
            serde_json::to_value(report_workflow(&dataset, &filter, faction)?)?
        }
        "unit" => {
            let faction = parse_optional_faction(&args, "faction")?
                .ok_or_else(|| T9aError::missing_field("faction"))?;
            let unit = parse_optional_string(&args, "unit")?
                .ok_or_else(|| T9aError::missing_field("unit"))?;
            let dataset = load_dataset(&root)?;
            serde_json::to_value(unit_workflow(&dataset, &filter, faction, &unit)?)?
        }
        _ => return Err(T9aError::unknown_mode(mode)),
    };
    Ok(value)
}

// ============================================================================
// Strict parsing helpers
// ============================================================================

/// Missing -> default, non-string -> error.
fn parse_string(args: &Value, field: &str, default: &str) -> Result<String, T9aError> {
    Ok(parse_optional_string(args, field)?.unwrap_or_else(|| default.to_string()))
}

/// Missing/null -> None, non-string -> error.
fn parse_optional_string(args: &Value, field: &str) -> Result<Option<String>, T9aError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| T9aError::invalid_field(field, "a string")),
    }
}

fn parse_optional_faction(args: &Value, field: &str) -> Result<Option<Faction>, T9aError> {
    match parse_optional_string(args, field)? {
        None => Ok(None),
        Some(s) => Ok(Some(Faction::from_code_or_name(&s)?)),
    }
}

/// Missing/null -> None, anything not matching `T` -> error.
fn parse_object<T: DeserializeOwned>(args: &Value, field: &str) -> Result<Option<T>, T9aError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| T9aError::invalid_field(field, &format!("a valid {field} object ({e})"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_string_rejects_numbers() {
        let args = json!({"unit": 3});
        let err = parse_optional_string(&args, "unit").unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidSettings);
    }

    #[test]
    fn faction_accepts_codes_and_names() {
        let args = json!({"a": "ong", "b": "Vampire Covenant"});
        assert_eq!(
            parse_optional_faction(&args, "a").unwrap(),
            Some(Faction::OrcsAndGoblins)
        );
        assert_eq!(
            parse_optional_faction(&args, "b").unwrap(),
            Some(Faction::VampireCovenant)
        );
        assert_eq!(parse_optional_faction(&args, "c").unwrap(), None);
    }

    #[test]
    fn unknown_faction_keeps_its_code() {
        let args = json!({"faction": "XX"});
        let err = parse_optional_faction(&args, "faction").unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::UnknownFaction);
    }

    #[test]
    fn filter_object_is_parsed_strictly() {
        let ok = json!({"filter": {"min_tournament_size": 8}});
        let filter: FilterSettings = parse_object(&ok, "filter").unwrap().unwrap();
        assert_eq!(filter.min_tournament_size, 8);

        let bad = json!({"filter": {"min_tournament_size": "eight"}});
        assert!(parse_object::<FilterSettings>(&bad, "filter").is_err());
    }
}
