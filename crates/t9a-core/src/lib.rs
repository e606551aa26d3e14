//! # t9a-core
//!
//! **Tier 4 (Façade)**
//!
//! This crate is the **primary library interface** for t9a-stats. It loads
//! a data directory once, then runs filter, query and report workflows
//! over the loaded tables, converting every failure into a structured
//! [`T9aError`].
//!
//! If you are embedding t9a-stats into another Rust application, depend on
//! this crate and `t9a-types`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use t9a_core::settings::FilterSettings;
//! use t9a_core::{load_dataset, report_workflow};
//!
//! let dataset = load_dataset(Path::new("data")).expect("data directory");
//! let report = report_workflow(&dataset, &FilterSettings::default(), None).expect("report");
//! println!("{} games", report.game_wide.num_games);
//! ```

pub mod error;
pub mod ffi;

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

// Re-export types for convenience
pub use t9a_analysis as analysis;
pub use t9a_query as query;
pub use t9a_settings as settings;
pub use t9a_types as types;

pub use error::{ErrorCode, T9aError};

use t9a_analysis::{FactionReport, GameWideReport, faction_report, game_wide_report};
use t9a_filter::{FilterBounds, FilteredView, bounds, try_filter};
use t9a_query::{
    ListDetails, ListQuery, QueryError, QueryOutcome, QuerySummary, UnitChoices, UnitInspection,
    available_units, describe_list, inspect_unit, search_lists, unit_option_choices,
};
use t9a_settings::{FilterSettings, QuerySettings};
use t9a_types::{Dataset, Faction, SCHEMA_VERSION};

/// Load and normalize every tournament under `root`.
pub fn load_dataset(root: &Path) -> Result<Dataset, T9aError> {
    Ok(t9a_load::load_dataset(root)?)
}

/// Validate `filter` and apply it to the dataset.
pub fn filter_workflow(dataset: &Dataset, filter: &FilterSettings) -> Result<FilteredView, T9aError> {
    Ok(try_filter(&dataset.tables, filter)?)
}

/// Row counts after filtering, plus what the unfiltered data spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub schema_version: u32,
    pub num_games: usize,
    pub lists: usize,
    pub units: usize,
    pub options: usize,
    /// Extremes of the unfiltered tables.
    pub bounds: FilterBounds,
    pub magic_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub fn summary_workflow(
    dataset: &Dataset,
    filter: &FilterSettings,
) -> Result<DatasetSummary, T9aError> {
    let view = filter_workflow(dataset, filter)?;
    Ok(DatasetSummary {
        schema_version: SCHEMA_VERSION,
        num_games: view.num_games,
        lists: view.tables.lists.len(),
        units: view.tables.units.len(),
        options: view.tables.options.len(),
        bounds: bounds(&dataset.tables),
        magic_paths: dataset.magic_paths.clone(),
        warnings: dataset.warnings.clone(),
    })
}

/// Outcome of a list query with its statistics and matched lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub outcome: QueryOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<QuerySummary>,
    pub lists: Vec<ListDetails>,
}

/// Filter, then run `query` against the filtered tables.
///
/// Unit names are checked against the whole dataset, so a filter that
/// leaves no list fielding a known unit gives `NoMatch`, not an error.
/// The summary compares the matched lists with every submitted list of the
/// faction that survived the filter.
pub fn query_workflow(
    dataset: &Dataset,
    filter: &FilterSettings,
    query: &QuerySettings,
) -> Result<QueryReport, T9aError> {
    let view = filter_workflow(dataset, filter)?;
    let query = ListQuery::from(query.clone());
    query.validate(&dataset.tables)?;
    let outcome = search_lists(&view.tables, &query);

    let (summary, lists) = match outcome.matched() {
        Some(result) => (
            Some(result.summary(&view.tables)),
            result
                .list_ids
                .iter()
                .filter_map(|&id| describe_list(&result.tables, id))
                .collect(),
        ),
        None => (None, Vec::new()),
    };

    Ok(QueryReport {
        outcome,
        summary,
        lists,
    })
}

/// Options seen for one unit of one faction and how each performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitReport {
    pub faction: Faction,
    pub choices: UnitChoices,
    pub inspection: UnitInspection,
}

pub fn unit_workflow(
    dataset: &Dataset,
    filter: &FilterSettings,
    faction: Faction,
    unit_name: &str,
) -> Result<UnitReport, T9aError> {
    let view = filter_workflow(dataset, filter)?;
    if !available_units(&dataset.tables, faction)
        .iter()
        .any(|u| u == unit_name)
    {
        return Err(QueryError::UnknownUnit {
            faction,
            unit: unit_name.to_string(),
        }
        .into());
    }

    let ids: BTreeSet<u64> = view
        .tables
        .lists
        .iter()
        .filter(|l| l.faction == faction && l.has_list)
        .map(|l| l.list_id)
        .collect();
    let faction_tables = view.tables.select(&ids);

    Ok(UnitReport {
        faction,
        choices: unit_option_choices(&view.tables, faction, unit_name),
        inspection: inspect_unit(&faction_tables, unit_name),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub game_wide: GameWideReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction: Option<FactionReport>,
}

/// Game-wide reports over the filtered tables, plus one faction's if asked.
pub fn report_workflow(
    dataset: &Dataset,
    filter: &FilterSettings,
    faction: Option<Faction>,
) -> Result<Report, T9aError> {
    let view = filter_workflow(dataset, filter)?;
    Ok(Report {
        game_wide: game_wide_report(&view.tables, &dataset.magic_paths),
        faction: faction.map(|f| faction_report(&view.tables, f)),
    })
}
