//! Faction popularity and balance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use t9a_math::{mean, round_f64, standard_error, two_tailed_p, z_score};
use t9a_types::{Faction, MAX_SCORE, NUM_FACTIONS, Tables, TournamentType, Turn};

use crate::matchup::{RowLabel, ScoreCell};

/// Labels of the score bands used by [`FactionCount::by_score`].
pub const SCORE_BANDS: [&str; 5] = ["<4", "4-7", "8-12", "13-16", ">16"];

/// Index into [`SCORE_BANDS`] for a game score.
pub fn score_band(score: u32) -> usize {
    match score {
        0..=3 => 0,
        4..=7 => 1,
        8..=12 => 2,
        13..=16 => 3,
        _ => 4,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionCount {
    pub faction: Faction,
    pub lists: usize,
    pub first: usize,
    pub second: usize,
    pub unknown: usize,
    pub singles: usize,
    pub teams: usize,
    /// Lists against each opponent, in [`Faction::ALL`] order.
    pub by_opponent: Vec<usize>,
    /// Lists per [`SCORE_BANDS`] entry.
    pub by_score: [usize; 5],
    /// Lists per tournament start month (`YYYY-MM`).
    pub by_month: BTreeMap<String, usize>,
}

impl FactionCount {
    fn empty(faction: Faction) -> Self {
        Self {
            faction,
            lists: 0,
            first: 0,
            second: 0,
            unknown: 0,
            singles: 0,
            teams: 0,
            by_opponent: vec![0; NUM_FACTIONS],
            by_score: [0; 5],
            by_month: BTreeMap::new(),
        }
    }
}

/// Lists per faction with every split, one entry per faction.
pub fn faction_counts(tables: &Tables) -> Vec<FactionCount> {
    let mut counts: Vec<FactionCount> =
        Faction::ALL.iter().map(|&f| FactionCount::empty(f)).collect();

    for row in &tables.lists {
        let entry = &mut counts[row.faction.index()];
        entry.lists += 1;
        match row.turn {
            Turn::First => entry.first += 1,
            Turn::Second => entry.second += 1,
            Turn::Unknown => entry.unknown += 1,
        }
        match row.tournament_type {
            TournamentType::Singles => entry.singles += 1,
            TournamentType::Teams => entry.teams += 1,
            TournamentType::Unknown => {}
        }
        entry.by_opponent[row.opponent.index()] += 1;
        entry.by_score[score_band(row.score)] += 1;
        let month = format!("{}-{:02}", row.start_date.year(), u8::from(row.start_date.month()));
        *entry.by_month.entry(month).or_default() += 1;
    }
    counts
}

/// Pairing frequencies in team tournaments, as percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingTable {
    /// Team games after filtering.
    pub team_games: usize,
    pub columns: Vec<Faction>,
    /// [`RowLabel::All`] first, then one row per opponent.
    pub rows: Vec<PairingRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingRow {
    pub label: RowLabel,
    /// `None` where the column faction has no team games.
    pub cells: Vec<Option<f64>>,
}

/// Team-tournament pairing popularity.
///
/// The All row is each faction's share of all team lists; an opponent row
/// is the share of the column faction's team games against that opponent.
/// Percentages are rounded to one decimal.
pub fn pairing_popularity(tables: &Tables) -> PairingTable {
    let mut totals = vec![0usize; NUM_FACTIONS];
    let mut pairs = vec![vec![0usize; NUM_FACTIONS]; NUM_FACTIONS];
    for row in tables
        .lists
        .iter()
        .filter(|l| l.tournament_type == TournamentType::Teams)
    {
        totals[row.faction.index()] += 1;
        pairs[row.opponent.index()][row.faction.index()] += 1;
    }
    let team_lists: usize = totals.iter().sum();

    let percent =
        |n: usize, of: usize| (of > 0).then(|| round_f64(n as f64 / of as f64 * 100.0, 1));

    let mut rows = vec![PairingRow {
        label: RowLabel::All,
        cells: totals.iter().map(|&n| percent(n, team_lists)).collect(),
    }];
    rows.extend(Faction::ALL.iter().zip(&pairs).map(|(&opp, counts)| PairingRow {
        label: RowLabel::Opponent(opp),
        cells: counts
            .iter()
            .zip(&totals)
            .map(|(&n, &total)| percent(n, total))
            .collect(),
    }));

    PairingTable {
        team_games: team_lists / 2,
        columns: Faction::ALL.to_vec(),
        rows,
    }
}

/// How far a faction's mean score sits from the balance target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionPerformance {
    pub faction: Faction,
    /// Non-mirror games.
    pub games: usize,
    pub mean_score: Option<f64>,
    pub standard_error: f64,
    pub z_score: Option<f64>,
    pub p_value: Option<f64>,
}

/// Mean score against `target` per faction, mirror matches excluded.
///
/// Factions with no games, one game, or identical scores get `None` for
/// the z-score and p-value.
pub fn faction_performance(tables: &Tables, target: f64) -> Vec<FactionPerformance> {
    let mut scores = vec![Vec::new(); NUM_FACTIONS];
    for row in tables.lists.iter().filter(|l| l.faction != l.opponent) {
        scores[row.faction.index()].push(f64::from(row.score));
    }

    Faction::ALL
        .iter()
        .zip(&scores)
        .map(|(&faction, scores)| {
            let mean_score = mean(scores);
            let sem = standard_error(scores);
            let z = mean_score.and_then(|m| z_score(m, target, sem));
            FactionPerformance {
                faction,
                games: scores.len(),
                mean_score,
                standard_error: sem,
                z_score: z,
                p_value: z.map(|z| round_f64(two_tailed_p(z), 4)),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPerformance {
    pub turn: Turn,
    pub scores: Option<ScoreCell>,
}

pub fn turn_performance(tables: &Tables) -> Vec<TurnPerformance> {
    Turn::ALL
        .iter()
        .map(|&turn| {
            let scores: Vec<f64> = tables
                .lists
                .iter()
                .filter(|l| l.turn == turn)
                .map(|l| f64::from(l.score))
                .collect();
            TurnPerformance {
                turn,
                scores: ScoreCell::from_scores(&scores),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBin {
    pub score: u32,
    pub first: usize,
    pub second: usize,
    pub unknown: usize,
}

/// Lists per score from 0 to 20, split by turn.
pub fn score_distribution(tables: &Tables) -> Vec<ScoreBin> {
    let mut bins: Vec<ScoreBin> = (0..=MAX_SCORE)
        .map(|score| ScoreBin {
            score,
            ..ScoreBin::default()
        })
        .collect();
    for row in &tables.lists {
        if let Some(bin) = bins.get_mut(row.score as usize) {
            match row.turn {
                Turn::First => bin.first += 1,
                Turn::Second => bin.second += 1,
                Turn::Unknown => bin.unknown += 1,
            }
        }
    }
    bins
}
