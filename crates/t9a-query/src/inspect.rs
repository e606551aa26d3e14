//! Unit-level lookups: what a faction fields and how each option performs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use t9a_math::{mean, safe_ratio, sample_variance, subsample_z};
use t9a_types::{Faction, OPTION_TYPE_NUMBER_OF_UNITS, OptionRow, Tables};

/// Sorted distinct unit names across the faction's submitted lists.
pub fn available_units(tables: &Tables, faction: Faction) -> Vec<String> {
    let ids = faction_list_ids(tables, faction);
    tables
        .units
        .iter()
        .filter(|u| ids.contains(&u.list_id))
        .map(|u| u.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Choices seen for one unit of one faction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitChoices {
    pub unit_name: String,
    /// Sorted option names, model-count bands excluded.
    pub options: Vec<String>,
    /// Smallest and largest model count fielded, if the unit has one.
    pub model_range: Option<(u32, u32)>,
}

pub fn unit_option_choices(tables: &Tables, faction: Faction, unit_name: &str) -> UnitChoices {
    let ids = faction_list_ids(tables, faction);
    let options: BTreeSet<String> = tables
        .options
        .iter()
        .filter(|o| ids.contains(&o.list_id) && o.unit_name == unit_name && !o.is_model_count())
        .map(|o| o.option_name.clone())
        .collect();
    let models: Vec<u32> = tables
        .units
        .iter()
        .filter(|u| ids.contains(&u.list_id) && u.name == unit_name)
        .filter_map(|u| u.models)
        .collect();
    let model_range = models
        .iter()
        .min()
        .zip(models.iter().max())
        .map(|(lo, hi)| (*lo, *hi));

    UnitChoices {
        unit_name: unit_name.to_string(),
        options: options.into_iter().collect(),
        model_range,
    }
}

/// Popularity and performance of one option among lists fielding the unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionStat {
    pub option_name: String,
    pub option_type: String,
    pub lists_with_option: usize,
    /// Fraction of the unit's lists taking the option.
    pub share: f64,
    pub mean_score: f64,
    /// Finite-population z against the unit's own lists.
    pub z_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInspection {
    pub unit_name: String,
    pub lists_with_unit: usize,
    pub mean_score: Option<f64>,
    pub score_variance: Option<f64>,
    /// Option rows deduplicated per list, plus one "Number of Units" row per list.
    pub option_rows: Vec<OptionRow>,
    /// Sorted by popularity, then name.
    pub options: Vec<OptionStat>,
}

/// Option breakdown for every list in `tables` that fields `unit_name`.
///
/// Pass tables already narrowed to one faction for a faction-level report.
pub fn inspect_unit(tables: &Tables, unit_name: &str) -> UnitInspection {
    // list -> (copies, score)
    let mut copies: BTreeMap<u64, (usize, u32)> = BTreeMap::new();
    for unit in tables.units.iter().filter(|u| u.name == unit_name) {
        copies.entry(unit.list_id).or_insert((0, unit.score)).0 += 1;
    }

    let scores: Vec<f64> = copies.values().map(|(_, s)| f64::from(*s)).collect();
    let unit_mean = mean(&scores);
    let unit_var = sample_variance(&scores);

    let mut seen: BTreeSet<(u64, &str)> = BTreeSet::new();
    let mut option_rows: Vec<OptionRow> = tables
        .options
        .iter()
        .filter(|o| o.unit_name == unit_name && copies.contains_key(&o.list_id))
        .filter(|o| seen.insert((o.list_id, o.option_name.as_str())))
        .cloned()
        .collect();
    option_rows.extend(copies.iter().map(|(&list_id, &(n, score))| OptionRow {
        list_id,
        unit_id: None,
        unit_name: unit_name.to_string(),
        option_name: if n == 1 {
            "1 Unit".to_string()
        } else {
            format!("{n} Units")
        },
        option_type: OPTION_TYPE_NUMBER_OF_UNITS.to_string(),
        score,
    }));

    let mut grouped: BTreeMap<&str, (&str, Vec<f64>)> = BTreeMap::new();
    for row in &option_rows {
        grouped
            .entry(row.option_name.as_str())
            .or_insert((row.option_type.as_str(), Vec::new()))
            .1
            .push(f64::from(row.score));
    }

    let lists_with_unit = copies.len();
    let mut options: Vec<OptionStat> = grouped
        .into_iter()
        .map(|(name, (kind, scores))| {
            let m = mean(&scores).unwrap_or(0.0);
            OptionStat {
                option_name: name.to_string(),
                option_type: kind.to_string(),
                lists_with_option: scores.len(),
                share: safe_ratio(scores.len(), lists_with_unit),
                mean_score: m,
                z_score: unit_mean.and_then(|um| {
                    subsample_z(m, scores.len(), um, unit_var.unwrap_or(0.0), lists_with_unit)
                }),
            }
        })
        .collect();
    options.sort_by(|a, b| {
        b.lists_with_option
            .cmp(&a.lists_with_option)
            .then_with(|| a.option_name.cmp(&b.option_name))
    });

    UnitInspection {
        unit_name: unit_name.to_string(),
        lists_with_unit,
        mean_score: unit_mean,
        score_variance: unit_var,
        option_rows,
        options,
    }
}

fn faction_list_ids(tables: &Tables, faction: Faction) -> BTreeSet<u64> {
    tables
        .lists
        .iter()
        .filter(|l| l.faction == faction && l.has_list)
        .map(|l| l.list_id)
        .collect()
}
