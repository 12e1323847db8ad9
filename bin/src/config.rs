//! Settings file loading.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Data folder used when neither the command line nor the settings file name one.
pub(crate) const DEFAULT_DATA_FOLDER: &str = "../../../Lean/Data/";

/// Contents of `config.json`. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct Settings {
    data_folder: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read settings: {}", path.display()));
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Resolves the data folder: explicit override, then file, then default.
    pub(crate) fn data_folder(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.data_folder.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FOLDER))
    }
}
