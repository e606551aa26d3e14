//! Raw tournament record schema.
//!
//! A tournament folder holds one metadata record followed by one record per
//! game. Field names follow the upstream results export (camelCase).

use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::date_format;

/// First record of every tournament folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentMeta {
    /// 0 = teams, 1 = singles, anything else is unknown.
    #[serde(rename = "type")]
    pub kind: i64,
    /// Number of players.
    pub size: u32,
    #[serde(with = "date_format")]
    pub start: Date,
    #[serde(with = "date_format")]
    pub end: Date,
}

/// One game between two sides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub army_one: String,
    pub army_two: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub army_list_one: Option<ArmyList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub army_list_two: Option<ArmyList>,
    pub score_one: u32,
    pub score_two: u32,
    /// 0 when side one went first, 1 when side two did.
    #[serde(default)]
    pub first_turn: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
}

impl GameRecord {
    pub fn armies(&self) -> [&str; 2] {
        [&self.army_one, &self.army_two]
    }

    pub fn rosters(&self) -> [Option<&ArmyList>; 2] {
        [self.army_list_one.as_ref(), self.army_list_two.as_ref()]
    }

    pub fn scores(&self) -> [u32; 2] {
        [self.score_one, self.score_two]
    }
}

/// A submitted roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArmyList {
    /// Non-numeric values (e.g. an error string) are read as missing.
    #[serde(default, deserialize_with = "lenient_number")]
    pub magicalness: Option<f64>,
    #[serde(default)]
    pub units: Vec<UnitEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitEntry {
    pub name: String,
    pub category: String,
    pub cost: u32,
    #[serde(default)]
    pub models: Option<u32>,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrOther {
        Number(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match NumberOrOther::deserialize(deserializer)? {
        NumberOrOther::Number(v) => Some(v),
        NumberOrOther::Other(_) => None,
    })
}
