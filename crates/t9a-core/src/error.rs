//! Structured error types for the library and JSON boundaries.
//!
//! Every lower-tier error converts into a [`T9aError`] carrying a stable
//! [`ErrorCode`], so embedders can branch on the code and show the message.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use t9a_load::LoadError;
use t9a_query::QueryError;
use t9a_settings::SettingsError;
use t9a_types::UnknownFaction;

/// Error codes for t9a operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The data directory does not exist.
    DataRootMissing,
    /// I/O error while reading data or settings.
    IoError,
    /// Invalid JSON input.
    InvalidJson,
    /// Settings could not be parsed or hold an inverted range.
    InvalidSettings,
    /// A list query was rejected before searching.
    InvalidQuery,
    /// Faction code or name not in the closed set.
    UnknownFaction,
    /// Unknown operation mode.
    UnknownMode,
    /// Internal error (unexpected state).
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::DataRootMissing => "data_root_missing",
            ErrorCode::IoError => "io_error",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidSettings => "invalid_settings",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::UnknownFaction => "unknown_faction",
            ErrorCode::UnknownMode => "unknown_mode",
            ErrorCode::InternalError => "internal_error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct T9aError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl T9aError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn invalid_json(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidJson, format!("Invalid JSON: {err}"))
    }

    pub fn unknown_mode(mode: &str) -> Self {
        Self::new(ErrorCode::UnknownMode, format!("Unknown mode: {mode}"))
    }

    /// A JSON argument is present but has the wrong shape.
    pub fn invalid_field(field: &str, expected: &str) -> Self {
        Self::with_details(
            ErrorCode::InvalidSettings,
            format!("Invalid value for '{field}'"),
            format!("expected {expected}"),
        )
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::InvalidSettings,
            format!("Missing required field '{field}'"),
        )
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, format!("Internal error: {err}"))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"code":"{}","message":"{}"}}"#,
                self.code,
                self.message.replace('"', "'")
            )
        })
    }
}

impl fmt::Display for T9aError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "[{}] {}: {}", self.code, self.message, details),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl std::error::Error for T9aError {}

impl From<LoadError> for T9aError {
    fn from(err: LoadError) -> Self {
        let code = match err {
            LoadError::DataRootMissing { .. } => ErrorCode::DataRootMissing,
            LoadError::Walk { .. } => ErrorCode::IoError,
        };
        Self::new(code, err.to_string())
    }
}

impl From<SettingsError> for T9aError {
    fn from(err: SettingsError) -> Self {
        let code = match err {
            SettingsError::Io { .. } => ErrorCode::IoError,
            SettingsError::Toml { .. }
            | SettingsError::Json { .. }
            | SettingsError::InvertedRange { .. }
            | SettingsError::InvertedDates { .. } => ErrorCode::InvalidSettings,
        };
        Self::new(code, err.to_string())
    }
}

impl From<QueryError> for T9aError {
    fn from(err: QueryError) -> Self {
        Self::new(ErrorCode::InvalidQuery, err.to_string())
    }
}

impl From<UnknownFaction> for T9aError {
    fn from(err: UnknownFaction) -> Self {
        Self::new(ErrorCode::UnknownFaction, err.to_string())
    }
}

impl From<serde_json::Error> for T9aError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_json(err)
    }
}

/// `{"ok": true, "data": ...}` or `{"ok": false, "error": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<T9aError>,
}

impl ResponseEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(err: &T9aError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(err.clone()),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(
                r#"{{"ok":false,"error":{{"code":"internal_error","message":"{}"}}}}"#,
                err.to_string().replace('"', "'")
            )
        })
    }
}
