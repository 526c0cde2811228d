use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Settings;

/// Commented template written by `sc init`
pub const SETTINGS_TEMPLATE: &str = include_str!("../templates/site.toml");

/// Error type for reading `site.toml`
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse site.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read and parse `site.toml` from the site directory
pub fn read_settings(site_dir: &Path) -> Result<Settings, SettingsError> {
    let path = site_dir.join("site.toml");
    let text = fs::read_to_string(&path).map_err(|e| SettingsError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}
