//! Unit popularity and points spent per category within one faction.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use t9a_math::{
    correlation_p, mean, median, pearson_r, safe_ratio, sample_variance, std_dev, subsample_z,
};
use t9a_types::{Faction, Tables, order_categories};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPopularity {
    pub unit_name: String,
    pub lists_with_unit: usize,
    /// Fraction of the faction's submitted lists fielding the unit.
    pub share: f64,
    /// Copies per list, over lists fielding the unit.
    pub avg_copies: f64,
    pub std_copies: Option<f64>,
    /// Points spent on the unit per list, over lists fielding it.
    pub avg_points: f64,
    pub std_points: Option<f64>,
    pub mean_score: f64,
    /// Finite-population z against every faction list with a unit.
    pub z_score: Option<f64>,
}

/// Per unit name, most popular first.
pub fn unit_popularity(tables: &Tables, faction: Faction) -> Vec<UnitPopularity> {
    let lists = faction_lists(tables, faction);

    // name -> list -> (copies, points, score)
    let mut usage: BTreeMap<&str, BTreeMap<u64, (f64, f64, f64)>> = BTreeMap::new();
    let mut fielded: BTreeMap<u64, f64> = BTreeMap::new();
    for unit in tables.units.iter().filter(|u| lists.contains_key(&u.list_id)) {
        let score = f64::from(unit.score);
        let entry = usage
            .entry(unit.name.as_str())
            .or_default()
            .entry(unit.list_id)
            .or_insert((0.0, 0.0, score));
        entry.0 += 1.0;
        entry.1 += f64::from(unit.cost);
        fielded.insert(unit.list_id, score);
    }

    let population: Vec<f64> = fielded.into_values().collect();
    let pop_mean = mean(&population);
    let pop_var = sample_variance(&population).unwrap_or(0.0);

    let mut out: Vec<UnitPopularity> = usage
        .into_iter()
        .map(|(name, per_list)| {
            let copies: Vec<f64> = per_list.values().map(|v| v.0).collect();
            let points: Vec<f64> = per_list.values().map(|v| v.1).collect();
            let scores: Vec<f64> = per_list.values().map(|v| v.2).collect();
            let mean_score = mean(&scores).unwrap_or(0.0);
            UnitPopularity {
                unit_name: name.to_string(),
                lists_with_unit: per_list.len(),
                share: safe_ratio(per_list.len(), lists.len()),
                avg_copies: mean(&copies).unwrap_or(0.0),
                std_copies: std_dev(&copies),
                avg_points: mean(&points).unwrap_or(0.0),
                std_points: std_dev(&points),
                mean_score,
                z_score: pop_mean.and_then(|pm| {
                    subsample_z(mean_score, scores.len(), pm, pop_var, population.len())
                }),
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.lists_with_unit
            .cmp(&a.lists_with_unit)
            .then_with(|| a.unit_name.cmp(&b.unit_name))
    });
    out
}

/// Share of list points spent in one army-book category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    /// Lists with a points total that contribute to the shares.
    pub lists: usize,
    pub mean_share: f64,
    pub median_share: f64,
    pub std_share: Option<f64>,
    /// Correlation between the share and the list's score.
    pub pearson_r: Option<f64>,
    pub p_value: Option<f64>,
}

/// Per category, Characters/Core/Special first.
///
/// A list spending nothing in a category the faction uses counts as a
/// share of zero. Lists without a positive points total are skipped.
pub fn category_spend(tables: &Tables, faction: Faction) -> Vec<CategorySpend> {
    let lists = faction_lists(tables, faction);
    let totals: BTreeMap<u64, f64> = tables
        .lists
        .iter()
        .filter(|l| lists.contains_key(&l.list_id))
        .filter_map(|l| {
            l.total_points
                .filter(|&p| p > 0)
                .map(|p| (l.list_id, f64::from(p)))
        })
        .collect();

    let units: Vec<_> = tables
        .units
        .iter()
        .filter(|u| totals.contains_key(&u.list_id))
        .collect();
    let categories = order_categories(units.iter().map(|u| u.category.as_str()));

    let mut spent: BTreeMap<(u64, &str), f64> = BTreeMap::new();
    for unit in &units {
        *spent.entry((unit.list_id, unit.category.as_str())).or_default() += f64::from(unit.cost);
    }
    let with_units: BTreeSet<u64> = units.iter().map(|u| u.list_id).collect();

    categories
        .into_iter()
        .map(|category| {
            let (shares, scores): (Vec<f64>, Vec<f64>) = with_units
                .iter()
                .filter_map(|id| {
                    let total = totals.get(id)?;
                    let points = spent.get(&(*id, category.as_str())).copied().unwrap_or(0.0);
                    Some((points / total, *lists.get(id)?))
                })
                .unzip();
            let r = pearson_r(&shares, &scores);
            CategorySpend {
                lists: shares.len(),
                mean_share: mean(&shares).unwrap_or(0.0),
                median_share: median(&shares).unwrap_or(0.0),
                std_share: std_dev(&shares),
                pearson_r: r,
                p_value: r.and_then(|r| correlation_p(r, shares.len())),
                category,
            }
        })
        .collect()
}

/// Submitted lists of `faction`, keyed by id, with their scores.
fn faction_lists(tables: &Tables, faction: Faction) -> BTreeMap<u64, f64> {
    tables
        .lists
        .iter()
        .filter(|l| l.faction == faction && l.has_list)
        .map(|l| (l.list_id, f64::from(l.score)))
        .collect()
}
