//! # t9a-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings types for the filter and query layers.
//! These types mirror CLI arguments without Clap dependencies,
//! making them suitable for the JSON entrypoint and library consumers.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Filter, query and settings-file types
//! * Default values and range validation
//! * Parsing of `t9a.toml` and query files
//!
//! ## What does NOT belong here
//! * Clap parsing (use the `t9a` CLI crate)
//! * Filtering or matching logic
//! * Data loading

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

pub use t9a_types::{Faction, TournamentType, Turn};

/// Default settings file name looked up in the working directory.
pub const SETTINGS_FILE_NAME: &str = "t9a.toml";

/// Default data directory when neither flag nor settings file names one.
pub const DEFAULT_DATA_ROOT: &str = "data";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("start date {start} is after end date {end}")]
    InvertedDates { start: Date, end: Date },
}

// -------------------------
// Filter settings
// -------------------------

/// Which tournament format to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentTypeFilter {
    #[default]
    Any,
    Singles,
    Teams,
}

impl TournamentTypeFilter {
    pub fn matches(self, kind: TournamentType) -> bool {
        match self {
            TournamentTypeFilter::Any => true,
            TournamentTypeFilter::Singles => kind == TournamentType::Singles,
            TournamentTypeFilter::Teams => kind == TournamentType::Teams,
        }
    }
}

/// Settings for narrowing the tables to a subset of lists.
///
/// All bounds are inclusive. A missing date leaves that side unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Keep tournaments starting on or after this date.
    #[serde(with = "t9a_types::date_format::option")]
    pub start_date: Option<Date>,

    /// Keep tournaments ending on or before this date.
    #[serde(with = "t9a_types::date_format::option")]
    pub end_date: Option<Date>,

    /// Gate lists on the points size of their game.
    pub by_list_size: bool,

    pub min_list_size: u32,
    pub max_list_size: u32,

    /// Player-count bounds.
    pub min_tournament_size: u32,
    pub max_tournament_size: u32,

    pub tournament_type: TournamentTypeFilter,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            by_list_size: false,
            min_list_size: 0,
            max_list_size: u32::MAX,
            min_tournament_size: 0,
            max_tournament_size: u32::MAX,
            tournament_type: TournamentTypeFilter::Any,
        }
    }
}

impl FilterSettings {
    /// Reject inverted ranges before any filtering happens.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(SettingsError::InvertedDates { start, end });
        }
        if self.min_list_size > self.max_list_size {
            return Err(SettingsError::InvertedRange {
                field: "list_size",
                min: self.min_list_size,
                max: self.max_list_size,
            });
        }
        if self.min_tournament_size > self.max_tournament_size {
            return Err(SettingsError::InvertedRange {
                field: "tournament_size",
                min: self.min_tournament_size,
                max: self.max_tournament_size,
            });
        }
        Ok(())
    }

    /// Apply explicitly given values on top of `self`.
    ///
    /// Setting either list-size bound turns on `by_list_size`.
    pub fn overridden_by(&self, overrides: &FilterOverrides) -> FilterSettings {
        let mut out = self.clone();
        if let Some(v) = overrides.start_date {
            out.start_date = Some(v);
        }
        if let Some(v) = overrides.end_date {
            out.end_date = Some(v);
        }
        if let Some(v) = overrides.min_list_size {
            out.min_list_size = v;
            out.by_list_size = true;
        }
        if let Some(v) = overrides.max_list_size {
            out.max_list_size = v;
            out.by_list_size = true;
        }
        if let Some(v) = overrides.min_tournament_size {
            out.min_tournament_size = v;
        }
        if let Some(v) = overrides.max_tournament_size {
            out.max_tournament_size = v;
        }
        if let Some(v) = overrides.tournament_type {
            out.tournament_type = v;
        }
        out
    }
}

/// Filter values set explicitly by the caller, e.g. CLI flags.
///
/// `None` keeps the underlying value, so a flag equal to the default still
/// overrides a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOverrides {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub min_list_size: Option<u32>,
    pub max_list_size: Option<u32>,
    pub min_tournament_size: Option<u32>,
    pub max_tournament_size: Option<u32>,
    pub tournament_type: Option<TournamentTypeFilter>,
}

// -------------------------
// Query settings
// -------------------------

/// Turn-order constraint of a list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnFilter {
    #[default]
    Any,
    First,
    Second,
}

impl TurnFilter {
    pub fn matches(self, turn: Turn) -> bool {
        match self {
            TurnFilter::Any => true,
            TurnFilter::First => turn == Turn::First,
            TurnFilter::Second => turn == Turn::Second,
        }
    }
}

/// One unit slot of a query file. Repeat a name to ask for several copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSlotSettings {
    pub name: String,

    /// Inclusive `[min, max]` model-count range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<(u32, u32)>,

    #[serde(default)]
    pub required: BTreeSet<String>,

    #[serde(default)]
    pub banned: BTreeSet<String>,
}

/// Serialized form of a list query (TOML or JSON query file, FFI args).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Code or full name, any case.
    #[serde(deserialize_with = "lenient::faction")]
    pub faction: Faction,

    #[serde(default)]
    pub units: Vec<UnitSlotSettings>,

    /// `None` keeps every opponent.
    #[serde(
        default,
        deserialize_with = "lenient::factions",
        skip_serializing_if = "Option::is_none"
    )]
    pub opponents: Option<BTreeSet<Faction>>,

    #[serde(default)]
    pub turn: TurnFilter,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployments: Option<BTreeSet<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primaries: Option<BTreeSet<String>>,
}

/// Faction fields accepting the same spellings as the CLI.
mod lenient {
    use std::collections::BTreeSet;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use t9a_types::Faction;

    pub fn faction<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Faction, D::Error> {
        let value = String::deserialize(deserializer)?;
        Faction::from_code_or_name(&value).map_err(D::Error::custom)
    }

    pub fn factions<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BTreeSet<Faction>>, D::Error> {
        Option::<Vec<String>>::deserialize(deserializer)?
            .map(|values| {
                values
                    .iter()
                    .map(|v| Faction::from_code_or_name(v).map_err(D::Error::custom))
                    .collect()
            })
            .transpose()
    }
}

impl QuerySettings {
    /// Read a query file; `.json` files are JSON, everything else TOML.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = read(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content).map_err(|source| SettingsError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&content).map_err(|source| SettingsError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

// -------------------------
// Settings file
// -------------------------

/// Contents of `t9a.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of tournament folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,

    pub filter: FilterSettings,
}

impl Settings {
    /// Load settings from a TOML string.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load settings from a file path.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = read(path)?;
        Self::parse(&content).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured data root, or [`DEFAULT_DATA_ROOT`].
    pub fn data_root_or_default(&self) -> PathBuf {
        self.data_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_ROOT))
    }
}

fn read(path: &Path) -> Result<String, SettingsError> {
    std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}
