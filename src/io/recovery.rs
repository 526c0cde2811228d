use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- showcase recovery log: append-only copies of data that could not be
     loaded or saved normally. Corrupt payloads replaced by defaults and
     payloads whose write failed end up here.
     View with: sc recovery
     Prune old entries: sc recovery prune
     Safe to delete if empty or stale. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// A persisted payload could not be deserialized and was replaced by defaults
    Load,
    /// A payload could not be written to the store
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Load => write!(f, "load"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "load" => Some(RecoveryCategory::Load),
            "write" => Some(RecoveryCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(site_dir: &Path) -> PathBuf {
    site_dir.join(".recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} [{}] {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            let fence = fence_for(&self.body);
            out.push('\n');
            out.push_str(&format!("{fence}text\n"));
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// A backtick fence longer than any backtick run in `body`
fn fence_for(body: &str) -> String {
    let longest = body.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Append a recovery entry to the log. Failures are reported as a warning
/// event and otherwise swallowed.
pub fn log_recovery(site_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(site_dir, &entry) {
        tracing::warn!(
            error = %e,
            category = %entry.category,
            "could not write to recovery log"
        );
    }
}

fn log_recovery_inner(site_dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(site_dir);
    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Read recovery entries, most recent first.
pub fn read_recovery_entries(site_dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match std::fs::read_to_string(recovery_log_path(site_dir)) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }
    entries.reverse();
    entries
}

/// Parse all entries from the log content, oldest first.
fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut fence: Option<&str> = None;

        for line in lines.by_ref() {
            if let Some(open) = fence {
                if line == open {
                    fence = None;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }
            if line == "---" {
                break;
            }
            if line.starts_with("```") {
                let ticks = line.len() - line.trim_start_matches('`').len();
                fence = Some(&line[..ticks]);
                continue;
            }
            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> [<category>] <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" [")?;
    let (category_str, description) = rest.split_once("] ")?;

    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let category = RecoveryCategory::parse_category(category_str)?;
    Some((timestamp, category, description.to_string()))
}

/// Drop entries older than `before` (or every entry when `before` is None).
/// Returns the number of entries removed.
pub fn prune_recovery(site_dir: &Path, before: Option<DateTime<Utc>>) -> io::Result<usize> {
    let path = recovery_log_path(site_dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let entries = parse_entries(&content);
    let (keep, drop): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|e| before.is_some_and(|cutoff| e.timestamp >= cutoff));

    if drop.is_empty() {
        return Ok(0);
    }

    let mut out = String::from(FILE_HEADER);
    for entry in &keep {
        out.push_str(&entry.to_markdown());
    }
    atomic_write(&path, out.as_bytes())?;
    Ok(drop.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(category: RecoveryCategory, description: &str, body: &str) -> RecoveryEntry {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.to_string(),
            fields: vec![("Key".to_string(), "fc_posts".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fc_config.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn log_and_read_back_most_recent_first() {
        let dir = TempDir::new().unwrap();
        log_recovery(dir.path(), entry(RecoveryCategory::Load, "corrupt payload", "[{oops"));
        log_recovery(dir.path(), entry(RecoveryCategory::Write, "write failed", "[]\n"));

        let content = std::fs::read_to_string(recovery_log_path(dir.path())).unwrap();
        assert!(content.starts_with("<!-- showcase recovery log"));

        let entries = read_recovery_entries(dir.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, RecoveryCategory::Write);
        assert_eq!(entries[0].body, "[]");
        assert_eq!(entries[1].category, RecoveryCategory::Load);
        assert_eq!(entries[1].description, "corrupt payload");
        assert_eq!(entries[1].body, "[{oops");
        assert_eq!(entries[1].fields, vec![("Key".to_string(), "fc_posts".to_string())]);
    }

    #[test]
    fn body_with_fences_and_rules_survives() {
        let dir = TempDir::new().unwrap();
        let body = "{\"slogan\": \"a\n```\n---\n## 2024-01-01T00:00:00Z [load] fake\n````\"}";
        log_recovery(dir.path(), entry(RecoveryCategory::Write, "write failed", body));
        log_recovery(dir.path(), entry(RecoveryCategory::Load, "after", "[]"));

        let entries = read_recovery_entries(dir.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "after");
        assert_eq!(entries[1].body, body);
        assert_eq!(entries[1].fields.len(), 1);
    }

    #[test]
    fn fence_outgrows_backtick_runs() {
        assert_eq!(fence_for("[]"), "```");
        assert_eq!(fence_for("a ``` b"), "````");
        assert_eq!(fence_for("`````"), "``````");
    }

    #[test]
    fn read_with_limit_keeps_newest() {
        let dir = TempDir::new().unwrap();
        for i in 0..3 {
            log_recovery(dir.path(), entry(RecoveryCategory::Load, &format!("e{}", i), ""));
        }
        let entries = read_recovery_entries(dir.path(), Some(2));
        let names: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["e2", "e1"]);
    }

    #[test]
    fn read_missing_log_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_recovery_entries(dir.path(), None).is_empty());
    }

    #[test]
    fn prune_all_and_by_age() {
        let dir = TempDir::new().unwrap();
        let mut old = entry(RecoveryCategory::Load, "old", "");
        old.timestamp = Utc::now() - chrono::Duration::days(60);
        log_recovery(dir.path(), old);
        log_recovery(dir.path(), entry(RecoveryCategory::Write, "new", ""));

        let cutoff = Utc::now() - chrono::Duration::days(30);
        assert_eq!(prune_recovery(dir.path(), Some(cutoff)).unwrap(), 1);
        let entries = read_recovery_entries(dir.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "new");

        assert_eq!(prune_recovery(dir.path(), None).unwrap(), 1);
        assert!(read_recovery_entries(dir.path(), None).is_empty());
    }
}
