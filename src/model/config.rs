use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tool settings from `site/site.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// How fresh post and inquiry ids are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Millisecond timestamp, bumped to stay strictly increasing
    #[default]
    Timestamp,
    /// Random v4 UUID
    Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Theme slot overrides, e.g. `background = "#000000"`.
    /// `primary` and `secondary` override the site's own brand colors.
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Write UI diagnostics to `site/.showcase.log`
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig { file: true }
    }
}

/// Default: see src/templates/site.toml
fn default_true() -> bool {
    true
}
