//! # t9a-analysis
//!
//! **Tier 3 (Reports)**
//!
//! Aggregate reports over (usually filtered) tables: faction popularity and
//! balance, team pairing popularity, the matchup table, magic paths, unit popularity and category
//! spend. Faction-keyed reports walk [`Faction::ALL`](t9a_types::Faction::ALL),
//! so a faction with no games still gets an entry with zero counts.
//!
//! ## What belongs here
//! * Per-faction, per-matchup and per-unit aggregation
//! * Significance of a mean against a target or its parent population
//!
//! ## What does NOT belong here
//! * Date/size filtering (use t9a-filter)
//! * Structural list matching (use t9a-query)
//! * Formatting or colouring of results

mod faction;
mod magic;
mod matchup;
mod report;
mod units;

pub use faction::{
    FactionCount, FactionPerformance, PairingRow, PairingTable, SCORE_BANDS, ScoreBin,
    TurnPerformance, faction_counts, faction_performance, pairing_popularity, score_band,
    score_distribution, turn_performance,
};
pub use magic::{
    MagicReport, MagicalnessStat, PathStat, magic_path_performance, magicalness_performance,
};
pub use matchup::{MatchupRow, MatchupTable, RowLabel, ScoreCell, matchup_table};
pub use report::{FactionReport, GameWideReport, faction_report, game_wide_report};
pub use units::{CategorySpend, UnitPopularity, category_spend, unit_popularity};
