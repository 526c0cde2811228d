use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::io::kv::{KeyValueStore, StoreError};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::inquiry::default_inquiries;
use crate::model::post::default_posts;
use crate::model::site::SiteRecords;
use crate::model::site_config::SiteConfig;

/// Error type for locating a site on disk
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("not a showcase site: no site/site.toml found (run `sc init`)")]
    NotASite,
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The three persisted records and their fixed storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Config,
    Posts,
    Inquiries,
}

impl RecordKey {
    pub const ALL: [RecordKey; 3] = [RecordKey::Config, RecordKey::Posts, RecordKey::Inquiries];

    pub fn key(self) -> &'static str {
        match self {
            RecordKey::Config => "fc_config",
            RecordKey::Posts => "fc_posts",
            RecordKey::Inquiries => "fc_inquiries",
        }
    }

    /// The record stored at `path` by a [`FileStore`](crate::io::kv::FileStore)
    pub fn from_path(path: &Path) -> Option<RecordKey> {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return None;
        }
        let stem = path.file_stem().and_then(|s| s.to_str())?;
        RecordKey::ALL.into_iter().find(|k| k.key() == stem)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A record that could not be loaded and was replaced by its default
#[derive(Debug, Clone)]
pub struct LoadIssue {
    pub key: RecordKey,
    pub error: String,
    /// The payload that failed to deserialize (empty if it could not be read)
    pub raw: String,
}

/// Discover the site by walking up from the given directory, looking for
/// `site/site.toml`. Returns the directory that contains `site/`.
pub fn discover_site(start: &Path) -> Result<PathBuf, SiteError> {
    let mut current = start.to_path_buf();
    loop {
        let site_dir = current.join("site");
        if site_dir.is_dir() && site_dir.join("site.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(SiteError::NotASite);
        }
    }
}

/// Load all three records. A missing or unreadable key yields that record's
/// default; loading itself never fails.
pub fn load_records(store: &dyn KeyValueStore) -> (SiteRecords, Vec<LoadIssue>) {
    let mut issues = Vec::new();
    let config = load_record(store, RecordKey::Config, SiteConfig::default, &mut issues);
    let posts = load_record(store, RecordKey::Posts, default_posts, &mut issues);
    let inquiries = load_record(store, RecordKey::Inquiries, default_inquiries, &mut issues);
    (
        SiteRecords {
            config,
            posts,
            inquiries,
        },
        issues,
    )
}

/// Re-read one record into `records`, falling back to its default.
pub fn reload_record(
    store: &dyn KeyValueStore,
    records: &mut SiteRecords,
    key: RecordKey,
) -> Option<LoadIssue> {
    let mut issues = Vec::new();
    match key {
        RecordKey::Config => {
            records.config = load_record(store, key, SiteConfig::default, &mut issues);
        }
        RecordKey::Posts => records.posts = load_record(store, key, default_posts, &mut issues),
        RecordKey::Inquiries => {
            records.inquiries = load_record(store, key, default_inquiries, &mut issues);
        }
    }
    issues.pop()
}

fn load_record<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: RecordKey,
    default: fn() -> T,
    issues: &mut Vec<LoadIssue>,
) -> T {
    let raw = match store.get(key.key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default(),
        Err(e) => {
            issues.push(LoadIssue {
                key,
                error: e.to_string(),
                raw: String::new(),
            });
            return default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            issues.push(LoadIssue {
                key,
                error: e.to_string(),
                raw,
            });
            default()
        }
    }
}

/// The self-describing text payload persisted for one record
pub fn record_payload(records: &SiteRecords, key: RecordKey) -> Result<String, StoreError> {
    let payload = match key {
        RecordKey::Config => serde_json::to_string_pretty(&records.config),
        RecordKey::Posts => serde_json::to_string_pretty(&records.posts),
        RecordKey::Inquiries => serde_json::to_string_pretty(&records.inquiries),
    };
    payload.map_err(|e| StoreError::Serialize {
        key: key.key().to_string(),
        source: e,
    })
}

/// Persist one record of `records` under its key, overwriting the previous
/// payload. The other two keys are left untouched.
pub fn save_one(
    store: &mut dyn KeyValueStore,
    records: &SiteRecords,
    key: RecordKey,
) -> Result<(), StoreError> {
    let payload = record_payload(records, key)?;
    store.set(key.key(), &payload)?;
    tracing::debug!(key = key.key(), bytes = payload.len(), "record written");
    Ok(())
}

/// Preserve payloads that were replaced by defaults, before the next save
/// overwrites them.
pub fn log_load_issues(site_dir: &Path, issues: &[LoadIssue]) {
    for issue in issues {
        tracing::warn!(key = issue.key.key(), error = %issue.error, "record replaced by default");
        recovery::log_recovery(
            site_dir,
            RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: RecoveryCategory::Load,
                description: "record replaced by default".to_string(),
                fields: vec![
                    ("Key".to_string(), issue.key.key().to_string()),
                    ("Error".to_string(), issue.error.clone()),
                ],
                body: issue.raw.clone(),
            },
        );
    }
}
