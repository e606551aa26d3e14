//! # t9a-walk
//!
//! **Tier 1 (Utilities)**
//!
//! Traversal of a results data root. The layout is one folder per
//! tournament, each holding one JSON record per file:
//!
//! ```text
//! data/
//!   2024-03-spring-cup/
//!     00_meta.json
//!     01_game.json
//! ```
//!
//! ## What belongs here
//! * Discovering tournament folders and their record files
//! * Deterministic (lexical) ordering
//!
//! ## What does NOT belong here
//! * Parsing records (use t9a-load)
//! * Any knowledge of the record schema

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;

/// One tournament folder and its record files in lexical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentDir {
    /// Folder name, used in diagnostics.
    pub name: String,
    pub path: PathBuf,
    pub records: Vec<PathBuf>,
}

/// List every tournament folder directly below `root`.
///
/// Folders are returned in lexical order, `.json` files inside each folder
/// likewise. Hidden entries are skipped; deeper nesting is ignored.
pub fn list_tournaments(root: &Path) -> Result<Vec<TournamentDir>> {
    if !root.is_dir() {
        bail!("data root {} is not a directory", root.display());
    }

    let mut folders: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(true);
    builder.follow_links(false);
    builder.max_depth(Some(2));
    builder.sort_by_file_name(|a, b| a.cmp(b));

    for entry in builder.build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        match entry.depth() {
            1 if file_type.is_dir() => {
                folders.entry(entry.path().to_path_buf()).or_default();
            }
            2 if file_type.is_file() && is_record_file(entry.path()) => {
                if let Some(parent) = entry.path().parent() {
                    folders
                        .entry(parent.to_path_buf())
                        .or_default()
                        .push(entry.path().to_path_buf());
                }
            }
            _ => {}
        }
    }

    Ok(folders
        .into_iter()
        .map(|(path, mut records)| {
            records.sort();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            TournamentDir {
                name,
                path,
                records,
            }
        })
        .collect())
}

/// Whether a path names a JSON record file.
pub fn is_record_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
