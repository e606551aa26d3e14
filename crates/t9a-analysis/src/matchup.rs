//! Faction-vs-faction score table.

use serde::{Deserialize, Serialize};
use t9a_math::{mean, round_sig, standard_error, z_score};
use t9a_types::{Faction, NUM_FACTIONS, Tables, Turn};

/// Mean score of a group of lists with its standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCell {
    pub n: usize,
    pub mean: f64,
    /// Zero for a single game.
    pub sem: f64,
}

impl ScoreCell {
    /// `None` for an empty group.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        Some(Self {
            n: scores.len(),
            mean: mean(scores)?,
            sem: standard_error(scores),
        })
    }

    /// Mean and error rounded to the error's first significant figure.
    pub fn display(&self) -> (f64, f64) {
        round_sig(self.mean, self.sem)
    }

    pub fn z_score(&self, target: f64) -> Option<f64> {
        z_score(self.mean, target, self.sem)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "faction", rename_all = "snake_case")]
pub enum RowLabel {
    /// Every game of the column faction, mirrors included.
    All,
    First,
    Second,
    /// Games of the column faction against this opponent.
    Opponent(Faction),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRow {
    pub label: RowLabel,
    /// One cell per faction, in [`Faction::ALL`] order.
    pub cells: Vec<Option<ScoreCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupTable {
    pub columns: Vec<Faction>,
    pub rows: Vec<MatchupRow>,
}

impl MatchupTable {
    pub fn cell(&self, label: RowLabel, faction: Faction) -> Option<&ScoreCell> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .and_then(|r| r.cells.get(faction.index()))
            .and_then(Option::as_ref)
    }
}

/// Rows All, First, Second, then one per opponent; mirror cells stay empty.
pub fn matchup_table(tables: &Tables) -> MatchupTable {
    let mut all = vec![Vec::new(); NUM_FACTIONS];
    let mut first = vec![Vec::new(); NUM_FACTIONS];
    let mut second = vec![Vec::new(); NUM_FACTIONS];
    let mut versus = vec![vec![Vec::new(); NUM_FACTIONS]; NUM_FACTIONS];

    for row in &tables.lists {
        let col = row.faction.index();
        let score = f64::from(row.score);
        all[col].push(score);
        match row.turn {
            Turn::First => first[col].push(score),
            Turn::Second => second[col].push(score),
            Turn::Unknown => {}
        }
        if row.opponent != row.faction {
            versus[row.opponent.index()][col].push(score);
        }
    }

    let mut rows = vec![
        MatchupRow {
            label: RowLabel::All,
            cells: to_cells(&all),
        },
        MatchupRow {
            label: RowLabel::First,
            cells: to_cells(&first),
        },
        MatchupRow {
            label: RowLabel::Second,
            cells: to_cells(&second),
        },
    ];
    rows.extend(Faction::ALL.iter().zip(&versus).map(|(&opp, groups)| MatchupRow {
        label: RowLabel::Opponent(opp),
        cells: to_cells(groups),
    }));

    MatchupTable {
        columns: Faction::ALL.to_vec(),
        rows,
    }
}

fn to_cells(groups: &[Vec<f64>]) -> Vec<Option<ScoreCell>> {
    groups.iter().map(|g| ScoreCell::from_scores(g)).collect()
}
