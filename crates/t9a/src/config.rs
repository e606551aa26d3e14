//! Settings file discovery and flag precedence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use t9a_core::settings::{FilterOverrides, FilterSettings, SETTINGS_FILE_NAME, Settings};

use crate::cli::GlobalArgs;

/// Data root and filter after merging the settings file with flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub data_root: PathBuf,
    pub filter: FilterSettings,
    /// The settings file that was read, if any.
    pub source: Option<PathBuf>,
}

/// `--config`, else `t9a.toml` in `cwd` when present, else built-in defaults.
///
/// An explicit `--config` that cannot be read is an error; a missing
/// implicit file is not.
pub fn resolve(global: &GlobalArgs, cwd: &Path) -> Result<Resolved> {
    let source = match &global.config {
        Some(path) => Some(path.clone()),
        None => Some(cwd.join(SETTINGS_FILE_NAME)).filter(|p| p.is_file()),
    };

    let settings = match &source {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let data_root = global
        .data
        .clone()
        .unwrap_or_else(|| settings.data_root_or_default());
    let filter = settings.filter.overridden_by(&FilterOverrides::from(global));

    Ok(Resolved {
        data_root,
        filter,
        source,
    })
}
