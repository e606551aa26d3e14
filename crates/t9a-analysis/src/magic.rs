//! Magic path and magicalness reports.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use t9a_math::{mean, safe_ratio, sample_variance, subsample_z};
use t9a_types::{OPTION_TYPE_PATH, Tables};

use crate::matchup::ScoreCell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStat {
    pub path: String,
    /// Distinct lists taking the path.
    pub lists: usize,
    /// Fraction of the lists that take any path.
    pub share: f64,
    pub mean_score: Option<f64>,
    /// Finite-population z against all lists taking a path.
    pub z_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicReport {
    pub lists_with_path: usize,
    pub mean_score: Option<f64>,
    pub paths: Vec<PathStat>,
}

/// Popularity and performance of each path in `magic_paths`.
pub fn magic_path_performance(tables: &Tables, magic_paths: &[String]) -> MagicReport {
    let scores: BTreeMap<u64, f64> = tables
        .lists
        .iter()
        .map(|l| (l.list_id, f64::from(l.score)))
        .collect();

    let mut by_path: BTreeMap<&str, BTreeSet<u64>> = BTreeMap::new();
    for opt in tables.options.iter().filter(|o| o.option_type == OPTION_TYPE_PATH) {
        by_path
            .entry(opt.option_name.as_str())
            .or_default()
            .insert(opt.list_id);
    }

    let any: BTreeSet<u64> = by_path.values().flatten().copied().collect();
    let any_scores: Vec<f64> = any.iter().filter_map(|id| scores.get(id).copied()).collect();
    let overall = mean(&any_scores);
    let variance = sample_variance(&any_scores).unwrap_or(0.0);

    let paths = magic_paths
        .iter()
        .map(|path| {
            let path_scores: Vec<f64> = by_path
                .get(path.as_str())
                .into_iter()
                .flatten()
                .filter_map(|id| scores.get(id).copied())
                .collect();
            let mean_score = mean(&path_scores);
            PathStat {
                path: path.clone(),
                lists: path_scores.len(),
                share: safe_ratio(path_scores.len(), any_scores.len()),
                mean_score,
                z_score: mean_score.zip(overall).and_then(|(m, o)| {
                    subsample_z(m, path_scores.len(), o, variance, any_scores.len())
                }),
            }
        })
        .collect();

    MagicReport {
        lists_with_path: any_scores.len(),
        mean_score: overall,
        paths,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicalnessStat {
    pub magicalness: f64,
    /// Fraction of lists with a known magicalness.
    pub share: f64,
    pub scores: ScoreCell,
}

/// Score by magicalness level, ascending.
pub fn magicalness_performance(tables: &Tables) -> Vec<MagicalnessStat> {
    let mut pairs: Vec<(f64, f64)> = tables
        .lists
        .iter()
        .filter_map(|l| l.magicalness.map(|m| (m, f64::from(l.score))))
        .filter(|(m, _)| m.is_finite())
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = pairs.len();
    pairs
        .chunk_by(|a, b| a.0 == b.0)
        .filter_map(|group| {
            let scores: Vec<f64> = group.iter().map(|(_, s)| *s).collect();
            Some(MagicalnessStat {
                magicalness: group.first()?.0,
                share: safe_ratio(group.len(), total),
                scores: ScoreCell::from_scores(&scores)?,
            })
        })
        .collect()
}
