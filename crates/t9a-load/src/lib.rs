//! # t9a-load
//!
//! **Tier 2 (Ingestion)**
//!
//! Turns a directory of tournament folders into a [`Dataset`]: three flat
//! tables with monotonic ids, derived fields and reconciled names.
//!
//! ## What belongs here
//! * Reading and decoding tournament records
//! * Id assignment, model-count bands, game-size backfill
//! * Skipping bad records with a recorded warning
//!
//! ## What does NOT belong here
//! * Filtering or querying (use t9a-filter / t9a-query)
//! * Name clustering rules (use t9a-reconcile)

mod builder;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use t9a_types::record::{GameRecord, TournamentMeta};
use t9a_types::{Dataset, OPTION_TYPE_PATH, OptionRow, SCHEMA_VERSION};
use thiserror::Error;
use tracing::{debug, info, warn};

use builder::{TableBuilder, TournamentInfo};

pub use builder::{game_size, model_count_bucket};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data root {} does not exist or is not a directory", path.display())]
    DataRootMissing { path: PathBuf },

    #[error("failed to list {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },
}

/// The parsed records of one tournament folder, metadata first.
#[derive(Debug, Clone, Default)]
pub struct RawTournament {
    pub name: String,
    pub records: Vec<Value>,
}

/// Load every tournament below `root`.
pub fn load_dataset(root: &Path) -> Result<Dataset, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::DataRootMissing {
            path: root.to_path_buf(),
        });
    }
    let folders = t9a_walk::list_tournaments(root).map_err(|err| LoadError::Walk {
        path: root.to_path_buf(),
        message: format!("{err:#}"),
    })?;

    let mut warnings = Vec::new();
    let mut tournaments = Vec::with_capacity(folders.len());
    for folder in folders {
        let mut records = Vec::with_capacity(folder.records.len());
        for path in &folder.records {
            match read_record(path) {
                Ok(value) => records.push(value),
                Err(reason) => {
                    let msg = format!("skipping {}: {reason}", path.display());
                    warn!("{msg}");
                    warnings.push(msg);
                }
            }
        }
        tournaments.push(RawTournament {
            name: folder.name,
            records,
        });
    }

    let mut dataset = build_dataset(tournaments);
    warnings.append(&mut dataset.warnings);
    dataset.warnings = warnings;
    Ok(dataset)
}

fn read_record(path: &Path) -> Result<Value, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| format!("invalid JSON: {e}"))
}

/// Build a dataset from already-parsed tournaments, in the given order.
pub fn build_dataset<I>(tournaments: I) -> Dataset
where
    I: IntoIterator<Item = RawTournament>,
{
    let mut builder = TableBuilder::default();
    let mut warnings = Vec::new();
    let mut loaded = 0usize;

    for tournament in tournaments {
        let mut records = tournament.records.into_iter();
        let Some(first) = records.next() else {
            debug!(tournament = %tournament.name, "no records, skipped");
            continue;
        };
        let meta: TournamentMeta = match serde_json::from_value(first) {
            Ok(meta) => meta,
            Err(e) => {
                let msg = format!("{}: bad tournament metadata: {e}", tournament.name);
                warn!("{msg}");
                warnings.push(msg);
                continue;
            }
        };
        let info = TournamentInfo::from(&meta);
        let before = builder.games();

        for (idx, value) in records.enumerate() {
            let game: GameRecord = match serde_json::from_value(value) {
                Ok(game) => game,
                Err(e) => {
                    let msg = format!("{}: game {} unreadable: {e}", tournament.name, idx + 1);
                    warn!("{msg}");
                    warnings.push(msg);
                    continue;
                }
            };
            if let Err(e) = builder.push_game(&info, &game) {
                let msg = format!("{}: game {} skipped: {e}", tournament.name, idx + 1);
                warn!("{msg}");
                warnings.push(msg);
            }
        }

        loaded += 1;
        debug!(
            tournament = %tournament.name,
            kind = %info.kind,
            size = info.size,
            games = builder.games() - before,
            "tournament loaded"
        );
    }

    let num_games = builder.games() as usize;
    let mut tables = builder.tables;
    let corrections = t9a_reconcile::reconcile(&mut tables);
    let magic_paths = magic_paths(&tables.options);

    info!(
        tournaments = loaded,
        games = num_games,
        lists = tables.lists.len(),
        units = tables.units.len(),
        options = tables.options.len(),
        corrections = corrections.len(),
        warnings = warnings.len(),
        "dataset loaded"
    );

    Dataset {
        schema_version: SCHEMA_VERSION,
        tables,
        num_games,
        magic_paths,
        warnings,
    }
}

/// Sorted distinct names of options typed `"Path"`.
pub fn magic_paths(options: &[OptionRow]) -> Vec<String> {
    options
        .iter()
        .filter(|o| o.option_type == OPTION_TYPE_PATH)
        .map(|o| o.option_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
