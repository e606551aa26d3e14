//! # t9a-filter
//!
//! **Tier 2 (Selection)**
//!
//! Narrows the base tables to the lists matching a [`FilterSettings`] and
//! the unit/option rows those lists own.
//!
//! ## What belongs here
//! * List predicates (dates, list size, tournament size, format)
//! * Referentially consistent sub-tables
//! * Bounds of the filterable fields
//!
//! ## What does NOT belong here
//! * Settings parsing (use t9a-settings)
//! * Structural list queries (use t9a-query)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use t9a_settings::{FilterSettings, SettingsError};
use t9a_types::{ListRow, Tables};
use time::Date;

/// A filtered copy of the tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredView {
    pub tables: Tables,
    /// Lists kept divided by two.
    pub num_games: usize,
}

/// Whether one list passes every active predicate.
pub fn list_matches(row: &ListRow, settings: &FilterSettings) -> bool {
    if let Some(start) = settings.start_date
        && row.start_date < start
    {
        return false;
    }
    if let Some(end) = settings.end_date
        && row.end_date > end
    {
        return false;
    }
    if settings.by_list_size {
        match row.game_size {
            Some(size) if size >= settings.min_list_size && size <= settings.max_list_size => {}
            _ => return false,
        }
    }
    if row.tournament_size < settings.min_tournament_size
        || row.tournament_size > settings.max_tournament_size
    {
        return false;
    }
    settings.tournament_type.matches(row.tournament_type)
}

/// Apply `settings` to `tables` without validating them first.
///
/// Inverted ranges simply match nothing.
pub fn filter_tables(tables: &Tables, settings: &FilterSettings) -> FilteredView {
    let ids: BTreeSet<u64> = tables
        .lists
        .iter()
        .filter(|row| list_matches(row, settings))
        .map(|row| row.list_id)
        .collect();
    let tables = tables.select(&ids);
    let num_games = tables.num_games();
    FilteredView { tables, num_games }
}

/// Validate `settings`, then filter.
pub fn try_filter(
    tables: &Tables,
    settings: &FilterSettings,
) -> Result<FilteredView, SettingsError> {
    settings.validate()?;
    Ok(filter_tables(tables, settings))
}

/// Extremes of the filterable list fields, used to seed range controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBounds {
    pub min_game_size: Option<u32>,
    pub max_game_size: Option<u32>,
    pub max_tournament_size: Option<u32>,
    #[serde(with = "t9a_types::date_format::option")]
    pub earliest_start: Option<Date>,
    #[serde(with = "t9a_types::date_format::option")]
    pub latest_end: Option<Date>,
}

pub fn bounds(tables: &Tables) -> FilterBounds {
    let lists = &tables.lists;
    let sizes = || lists.iter().filter_map(|l| l.game_size);
    FilterBounds {
        min_game_size: sizes().min(),
        max_game_size: sizes().max(),
        max_tournament_size: lists.iter().map(|l| l.tournament_size).max(),
        earliest_start: lists.iter().map(|l| l.start_date).min(),
        latest_end: lists.iter().map(|l| l.end_date).max(),
    }
}
