//! # t9a-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the core data structures shared by every `t9a` crate:
//! the closed faction vocabulary, the three relational tables produced by the
//! loader (Lists, Units, Options), and the raw tournament record schema.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: the serialized form of the tables is the
//! contract consumed by downstream tools. Renamed or removed fields bump
//! `SCHEMA_VERSION`.
//!
//! ## What belongs here
//! * Pure data structs (rows, tables, dataset)
//! * Closed vocabularies (factions, turn order, tournament type)
//! * Serialization/Deserialization logic
//!
//! ## What does NOT belong here
//! * File I/O
//! * Name reconciliation, filtering or query logic
//! * CLI argument parsing

pub mod record;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

/// The current schema version for serialized tables.
pub const SCHEMA_VERSION: u32 = 1;

/// Number of playable factions.
pub const NUM_FACTIONS: usize = 16;

/// Points per game a perfectly balanced faction averages.
pub const BALANCE_TARGET: f64 = 10.0;

/// Highest score a side can be awarded in one game.
pub const MAX_SCORE: u32 = 20;

/// Option type of magic path selections.
pub const OPTION_TYPE_PATH: &str = "Path";

/// Option type of the synthesized unit size buckets.
pub const OPTION_TYPE_MODEL_COUNT: &str = "Model Count";

/// Option type of the synthesized per-list copy counts.
pub const OPTION_TYPE_NUMBER_OF_UNITS: &str = "Number of Units";

/// Serde adapter for `YYYY-MM-DD` dates.
///
/// Use with `#[serde(with = "t9a_types::date_format")]`, or the `option`
/// submodule for `Option<Date>` fields.
pub mod date_format {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;

    const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn format(date: &Date) -> Result<String, time::error::Format> {
        date.format(ISO_DATE)
    }

    pub fn parse(s: &str) -> Result<Date, time::error::Parse> {
        Date::parse(s, ISO_DATE)
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date).map_err(S::Error::custom)?)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::de::Error as _;
        use serde::ser::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        use super::{format, parse};

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_some(&format(d).map_err(S::Error::custom)?),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| parse(&s).map_err(D::Error::custom))
                .transpose()
        }
    }
}

// -------------------------
// Factions
// -------------------------

/// Returned when a faction code is not one of the sixteen known codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown faction code '{0}'")]
pub struct UnknownFaction(pub String);

/// One of the sixteen playable armies, identified by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[serde(rename = "BH")]
    BeastHerds,
    #[serde(rename = "DE")]
    DreadElves,
    #[serde(rename = "DH")]
    DwarvenHolds,
    #[serde(rename = "DL")]
    DemonLegions,
    #[serde(rename = "EoS")]
    EmpireOfSonnstahl,
    #[serde(rename = "HE")]
    HighbornElves,
    #[serde(rename = "ID")]
    InfernalDwarves,
    #[serde(rename = "KoE")]
    KingdomOfEquitaine,
    #[serde(rename = "OK")]
    OgreKhans,
    #[serde(rename = "OnG")]
    OrcsAndGoblins,
    #[serde(rename = "SA")]
    SaurianAncients,
    #[serde(rename = "SE")]
    SylvanElves,
    #[serde(rename = "UD")]
    UndyingDynasties,
    #[serde(rename = "VC")]
    VampireCovenant,
    #[serde(rename = "VS")]
    VerminSwarm,
    #[serde(rename = "WDG")]
    WarriorsOfTheDarkGods,
}

impl Faction {
    /// Every faction in canonical code order.
    pub const ALL: [Faction; NUM_FACTIONS] = [
        Faction::BeastHerds,
        Faction::DreadElves,
        Faction::DwarvenHolds,
        Faction::DemonLegions,
        Faction::EmpireOfSonnstahl,
        Faction::HighbornElves,
        Faction::InfernalDwarves,
        Faction::KingdomOfEquitaine,
        Faction::OgreKhans,
        Faction::OrcsAndGoblins,
        Faction::SaurianAncients,
        Faction::SylvanElves,
        Faction::UndyingDynasties,
        Faction::VampireCovenant,
        Faction::VerminSwarm,
        Faction::WarriorsOfTheDarkGods,
    ];

    /// Canonical short code, e.g. `"EoS"`.
    pub fn code(self) -> &'static str {
        match self {
            Faction::BeastHerds => "BH",
            Faction::DreadElves => "DE",
            Faction::DwarvenHolds => "DH",
            Faction::DemonLegions => "DL",
            Faction::EmpireOfSonnstahl => "EoS",
            Faction::HighbornElves => "HE",
            Faction::InfernalDwarves => "ID",
            Faction::KingdomOfEquitaine => "KoE",
            Faction::OgreKhans => "OK",
            Faction::OrcsAndGoblins => "OnG",
            Faction::SaurianAncients => "SA",
            Faction::SylvanElves => "SE",
            Faction::UndyingDynasties => "UD",
            Faction::VampireCovenant => "VC",
            Faction::VerminSwarm => "VS",
            Faction::WarriorsOfTheDarkGods => "WDG",
        }
    }

    /// Full army name, e.g. `"Empire of Sonnstahl"`.
    pub fn name(self) -> &'static str {
        match self {
            Faction::BeastHerds => "Beast Herds",
            Faction::DreadElves => "Dread Elves",
            Faction::DwarvenHolds => "Dwarven Holds",
            Faction::DemonLegions => "Demon Legions",
            Faction::EmpireOfSonnstahl => "Empire of Sonnstahl",
            Faction::HighbornElves => "Highborn Elves",
            Faction::InfernalDwarves => "Infernal Dwarves",
            Faction::KingdomOfEquitaine => "Kingdom of Equitaine",
            Faction::OgreKhans => "Ogre Khans",
            Faction::OrcsAndGoblins => "Orcs and Goblins",
            Faction::SaurianAncients => "Saurian Ancients",
            Faction::SylvanElves => "Sylvan Elves",
            Faction::UndyingDynasties => "Undying Dynasties",
            Faction::VampireCovenant => "Vampire Covenant",
            Faction::VerminSwarm => "Vermin Swarm",
            Faction::WarriorsOfTheDarkGods => "Warriors of the Dark Gods",
        }
    }

    /// Position of this faction in [`Faction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolve a code case-insensitively to its canonical faction.
    pub fn from_code(code: &str) -> Result<Faction, UnknownFaction> {
        let trimmed = code.trim();
        Faction::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownFaction(code.to_string()))
    }

    /// Resolve either a code or a full name, case-insensitively.
    pub fn from_code_or_name(value: &str) -> Result<Faction, UnknownFaction> {
        Faction::from_code(value).or_else(|err| {
            let trimmed = value.trim();
            Faction::ALL
                .into_iter()
                .find(|f| f.name().eq_ignore_ascii_case(trimmed))
                .ok_or(err)
        })
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Faction {
    type Err = UnknownFaction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Faction::from_code_or_name(s)
    }
}

// -------------------------
// Enums
// -------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Turn {
    First,
    Second,
    Unknown,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::First, Turn::Second, Turn::Unknown];

    /// Turn order of both sides from a record's `firstTurn` indicator.
    pub fn pair_from_indicator(first_turn: Option<i64>) -> (Turn, Turn) {
        match first_turn {
            Some(0) => (Turn::First, Turn::Second),
            Some(1) => (Turn::Second, Turn::First),
            _ => (Turn::Unknown, Turn::Unknown),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Turn::First => "First",
            Turn::Second => "Second",
            Turn::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TournamentType {
    Singles,
    Teams,
    Unknown,
}

impl TournamentType {
    /// Map the metadata `type` field: 0 is a team event, 1 a singles event.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => TournamentType::Teams,
            1 => TournamentType::Singles,
            _ => TournamentType::Unknown,
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TournamentType::Singles => "Singles",
            TournamentType::Teams => "Teams",
            TournamentType::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

// -------------------------
// Rows
// -------------------------

/// One side of one game: a faction, its result and (optionally) its roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListRow {
    pub list_id: u64,
    pub game_id: u64,
    pub faction: Faction,
    pub opponent: Faction,
    pub score: u32,
    pub turn: Turn,
    /// Whether a roster was submitted for this side.
    pub has_list: bool,
    pub total_points: Option<u32>,
    pub magicalness: Option<f64>,
    pub tournament_type: TournamentType,
    pub tournament_size: u32,
    /// List size bracket of the game, shared by both sides.
    pub game_size: Option<u32>,
    pub deployment: String,
    pub primary: String,
    #[serde(with = "date_format")]
    pub start_date: Date,
    #[serde(with = "date_format")]
    pub end_date: Date,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitRow {
    pub unit_id: u64,
    pub list_id: u64,
    pub name: String,
    pub category: String,
    pub cost: u32,
    /// Unit size; `None` for units without a variable model count.
    pub models: Option<u32>,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionRow {
    pub list_id: u64,
    /// `None` only for synthesized per-list rows.
    pub unit_id: Option<u64>,
    pub unit_name: String,
    pub option_name: String,
    pub option_type: String,
    pub score: u32,
}

impl OptionRow {
    pub fn is_model_count(&self) -> bool {
        self.option_type == OPTION_TYPE_MODEL_COUNT
    }
}

// -------------------------
// Tables
// -------------------------

/// The three related tables every analysis consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Tables {
    pub lists: Vec<ListRow>,
    pub units: Vec<UnitRow>,
    pub options: Vec<OptionRow>,
}

impl Tables {
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Distinct list ids in the List table.
    pub fn list_ids(&self) -> BTreeSet<u64> {
        self.lists.iter().map(|l| l.list_id).collect()
    }

    /// A new view holding only the given lists and the rows they own.
    pub fn select(&self, ids: &BTreeSet<u64>) -> Tables {
        Tables {
            lists: self
                .lists
                .iter()
                .filter(|l| ids.contains(&l.list_id))
                .cloned()
                .collect(),
            units: self
                .units
                .iter()
                .filter(|u| ids.contains(&u.list_id))
                .cloned()
                .collect(),
            options: self
                .options
                .iter()
                .filter(|o| ids.contains(&o.list_id))
                .cloned()
                .collect(),
        }
    }

    /// Number of games represented (two lists per game).
    pub fn num_games(&self) -> usize {
        self.lists.len() / 2
    }
}

/// Everything produced by one load of the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub schema_version: u32,
    pub tables: Tables,
    pub num_games: usize,
    /// Sorted distinct option names of type `"Path"`.
    pub magic_paths: Vec<String>,
    /// Diagnostics for records skipped while loading.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Army-book categories listed ahead of all others, in this order.
pub const CATEGORY_PRIORITY: [&str; 3] = ["Characters", "Core", "Special"];

/// Distinct category names, [`CATEGORY_PRIORITY`] first, the rest by first appearance.
pub fn order_categories<'a, I>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    for c in categories {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    CATEGORY_PRIORITY
        .iter()
        .copied()
        .filter(|p| seen.contains(p))
        .chain(seen.iter().copied().filter(|c| !CATEGORY_PRIORITY.contains(c)))
        .map(str::to_string)
        .collect()
}
