//! Query outcomes, their summary statistics and per-list details.

use serde::{Deserialize, Serialize};
use t9a_math::{mean, round_f64, round_sig, sample_variance, standard_error, subsample_z, two_tailed_p};
use t9a_types::{Faction, MAX_SCORE, OPTION_TYPE_MODEL_COUNT, Tables, Turn, order_categories};
use time::Date;

/// Result of submitting a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryOutcome {
    Matched(QueryResult),
    /// No list satisfied the query; `examined` lists passed the game filters.
    NoMatch { examined: usize },
}

impl QueryOutcome {
    pub fn matched(&self) -> Option<&QueryResult> {
        match self {
            QueryOutcome::Matched(result) => Some(result),
            QueryOutcome::NoMatch { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub faction: Faction,
    /// Sorted ids of the matched lists.
    pub list_ids: Vec<u64>,
    /// The matched lists with their units and options.
    pub tables: Tables,
    /// Faction lists that passed the game-level filters.
    pub examined: usize,
}

/// How the matched lists scored relative to the whole faction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySummary {
    pub faction: Faction,
    pub lists_found: usize,
    /// Submitted lists of the faction in the baseline tables.
    pub faction_lists: usize,
    pub mean_score: f64,
    pub standard_error: f64,
    /// Mean and error rounded to the error's first significant figure.
    pub display: (f64, f64),
    pub faction_mean: Option<f64>,
    /// Finite-population z of the found mean against the faction's scores.
    pub z_score: Option<f64>,
    pub p_value: Option<f64>,
    /// Found lists per score, index = score.
    pub score_histogram: Vec<usize>,
}

impl QueryResult {
    /// Summarize the match against the faction's submitted lists in `baseline`.
    pub fn summary(&self, baseline: &Tables) -> QuerySummary {
        let found: Vec<f64> = self
            .tables
            .lists
            .iter()
            .map(|l| f64::from(l.score))
            .collect();
        let faction: Vec<f64> = baseline
            .lists
            .iter()
            .filter(|l| l.faction == self.faction && l.has_list)
            .map(|l| f64::from(l.score))
            .collect();

        let mean_score = mean(&found).unwrap_or(0.0);
        let sem = standard_error(&found);
        let faction_mean = mean(&faction);
        let z_score = faction_mean.and_then(|fm| {
            subsample_z(
                mean_score,
                found.len(),
                fm,
                sample_variance(&faction).unwrap_or(0.0),
                faction.len(),
            )
        });

        let mut score_histogram = vec![0usize; MAX_SCORE as usize + 1];
        for l in &self.tables.lists {
            if let Some(slot) = score_histogram.get_mut(l.score as usize) {
                *slot += 1;
            }
        }

        QuerySummary {
            faction: self.faction,
            lists_found: found.len(),
            faction_lists: faction.len(),
            mean_score,
            standard_error: sem,
            display: round_sig(mean_score, sem),
            faction_mean,
            z_score,
            p_value: z_score.map(|z| round_f64(two_tailed_p(z), 4)),
            score_histogram,
        }
    }
}

/// One list rendered as game facts plus composition by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDetails {
    pub list_id: u64,
    #[serde(with = "t9a_types::date_format")]
    pub date: Date,
    pub tournament_size: u32,
    pub game_size: Option<u32>,
    pub opponent: Faction,
    pub turn: Turn,
    pub deployment: String,
    pub primary: String,
    pub score: u32,
    pub total_points: Option<u32>,
    pub categories: Vec<CategoryEntries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntries {
    pub category: String,
    pub units: Vec<UnitEntryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEntryLine {
    pub name: String,
    pub models: Option<u32>,
    pub cost: u32,
    /// Declared options, without the model-count band.
    pub options: Vec<String>,
}

/// Game facts and composition of one list, if present in `tables`.
pub fn describe_list(tables: &Tables, list_id: u64) -> Option<ListDetails> {
    let row = tables.lists.iter().find(|l| l.list_id == list_id)?;
    let units: Vec<_> = tables.units.iter().filter(|u| u.list_id == list_id).collect();
    let order = order_categories(units.iter().map(|u| u.category.as_str()));

    let categories = order
        .into_iter()
        .map(|category| {
            let units = units
                .iter()
                .filter(|u| u.category == category)
                .map(|u| UnitEntryLine {
                    name: u.name.clone(),
                    models: u.models,
                    cost: u.cost,
                    options: tables
                        .options
                        .iter()
                        .filter(|o| {
                            o.unit_id == Some(u.unit_id) && o.option_type != OPTION_TYPE_MODEL_COUNT
                        })
                        .map(|o| o.option_name.clone())
                        .collect(),
                })
                .collect();
            CategoryEntries { category, units }
        })
        .collect();

    Some(ListDetails {
        list_id,
        date: row.start_date,
        tournament_size: row.tournament_size,
        game_size: row.game_size,
        opponent: row.opponent,
        turn: row.turn,
        deployment: row.deployment.clone(),
        primary: row.primary.clone(),
        score: row.score,
        total_points: row.total_points,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_list_has_no_details() {
        assert_eq!(describe_list(&Tables::default(), 3), None);
    }

    #[test]
    fn no_match_serializes_with_tag() {
        let json = serde_json::to_string(&QueryOutcome::NoMatch { examined: 4 }).unwrap();
        assert_eq!(json, r#"{"outcome":"no_match","examined":4}"#);
    }
}
