//! Bundled reports for the game-wide and per-faction views.

use serde::{Deserialize, Serialize};
use t9a_types::{BALANCE_TARGET, Faction, Tables};

use crate::faction::{
    FactionCount, FactionPerformance, PairingTable, ScoreBin, TurnPerformance, faction_counts,
    faction_performance, pairing_popularity, score_distribution, turn_performance,
};
use crate::magic::{MagicReport, MagicalnessStat, magic_path_performance, magicalness_performance};
use crate::matchup::{MatchupTable, matchup_table};
use crate::units::{CategorySpend, UnitPopularity, category_spend, unit_popularity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameWideReport {
    pub num_games: usize,
    pub counts: Vec<FactionCount>,
    pub performance: Vec<FactionPerformance>,
    pub turns: Vec<TurnPerformance>,
    pub distribution: Vec<ScoreBin>,
    pub pairings: PairingTable,
    pub matchups: MatchupTable,
    pub magic: MagicReport,
    pub magicalness: Vec<MagicalnessStat>,
}

pub fn game_wide_report(tables: &Tables, magic_paths: &[String]) -> GameWideReport {
    GameWideReport {
        num_games: tables.num_games(),
        counts: faction_counts(tables),
        performance: faction_performance(tables, BALANCE_TARGET),
        turns: turn_performance(tables),
        distribution: score_distribution(tables),
        pairings: pairing_popularity(tables),
        matchups: matchup_table(tables),
        magic: magic_path_performance(tables, magic_paths),
        magicalness: magicalness_performance(tables),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionReport {
    pub faction: Faction,
    pub units: Vec<UnitPopularity>,
    pub categories: Vec<CategorySpend>,
}

pub fn faction_report(tables: &Tables, faction: Faction) -> FactionReport {
    FactionReport {
        faction,
        units: unit_popularity(tables, faction),
        categories: category_spend(tables, faction),
    }
}
