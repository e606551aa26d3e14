//! Subcommand handlers. Each one loads, filters and prints JSON.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use t9a_core::analysis::{
    category_spend, faction_counts, faction_performance, magic_path_performance,
    magicalness_performance, matchup_table, pairing_popularity, score_distribution,
    turn_performance, unit_popularity,
};
use t9a_core::settings::QuerySettings;
use t9a_core::types::{BALANCE_TARGET, Dataset};
use t9a_core::{
    filter_workflow, load_dataset, query_workflow, summary_workflow, unit_workflow,
};

use crate::cli::{Commands, TableKind};
use crate::config::Resolved;

pub fn dispatch(command: &Commands, resolved: &Resolved) -> Result<()> {
    let dataset = load_dataset(&resolved.data_root)?;
    for warning in &dataset.warnings {
        tracing::warn!("{warning}");
    }
    let value = render(command, &dataset, resolved)?;
    print_json(&value)
}

fn render(command: &Commands, dataset: &Dataset, resolved: &Resolved) -> Result<Value> {
    let filter = &resolved.filter;
    let value = match command {
        Commands::Summary => serde_json::to_value(summary_workflow(dataset, filter)?)?,
        Commands::Factions => {
            let view = filter_workflow(dataset, filter)?;
            let tables = &view.tables;
            json!({
                "num_games": view.num_games,
                "counts": faction_counts(tables),
                "performance": faction_performance(tables, BALANCE_TARGET),
                "turns": turn_performance(tables),
                "distribution": score_distribution(tables),
                "pairings": pairing_popularity(tables),
            })
        }
        Commands::Matchups => {
            let view = filter_workflow(dataset, filter)?;
            serde_json::to_value(matchup_table(&view.tables))?
        }
        Commands::Magic => {
            let view = filter_workflow(dataset, filter)?;
            json!({
                "paths": magic_path_performance(&view.tables, &dataset.magic_paths),
                "magicalness": magicalness_performance(&view.tables),
            })
        }
        Commands::Units(args) => {
            let view = filter_workflow(dataset, filter)?;
            json!({
                "faction": args.faction,
                "units": unit_popularity(&view.tables, args.faction),
                "categories": category_spend(&view.tables, args.faction),
            })
        }
        Commands::Unit(args) => {
            serde_json::to_value(unit_workflow(dataset, filter, args.faction, &args.name)?)?
        }
        Commands::Find(args) => {
            let query = QuerySettings::from_file(&args.query)
                .with_context(|| format!("Failed to load query from {}", args.query.display()))?;
            tracing::debug!(faction = %query.faction, slots = query.units.len(), "running query");
            serde_json::to_value(query_workflow(dataset, filter, &query)?)?
        }
        Commands::Export(args) => {
            let view = filter_workflow(dataset, filter)?;
            match args.table {
                TableKind::Lists => serde_json::to_value(&view.tables.lists)?,
                TableKind::Units => serde_json::to_value(&view.tables.units)?,
                TableKind::Options => serde_json::to_value(&view.tables.options)?,
            }
        }
    };
    Ok(value)
}

fn print_json(value: &Value) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
