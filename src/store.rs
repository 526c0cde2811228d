use std::collections::HashSet;

use crate::io::kv::{FileStore, KeyValueStore, StoreError};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::site_io::{self, LoadIssue, RecordKey};
use crate::model::config::Settings;
use crate::model::inquiry::{Inquiry, InquiryAction};
use crate::model::post::{Post, PostDraft};
use crate::model::site::{SitePaths, SiteRecords};
use crate::model::site_config::SiteConfig;
use crate::ops::command::{Command, Outcome, Rejection};
use crate::ops::ids::{self, Clock, IdGenerator, SystemClock};
use crate::ops::inquiry_ops;
use crate::ops::post_ops::{self, PostSave};

/// Error type for a command dispatched through [`Store::execute`]
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Validation refused the command; nothing changed
    #[error("{0}")]
    Rejected(#[from] Rejection),
    /// The change was applied in memory but could not be written
    #[error("{0}")]
    Storage(#[from] StoreError),
}

/// Owner of the three site records. Every mutation rewrites exactly the
/// record it touched.
pub struct Store<S: KeyValueStore = Box<dyn KeyValueStore>> {
    records: SiteRecords,
    kv: S,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    /// Records changed in memory whose last write failed
    unsaved: HashSet<RecordKey>,
}

impl<S: KeyValueStore> Store<S> {
    /// Load all records from `kv`, substituting defaults for missing or
    /// unreadable keys. The substitutions are returned for the caller to
    /// report.
    pub fn open(kv: S, ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> (Self, Vec<LoadIssue>) {
        let (records, issues) = site_io::load_records(&kv);
        (
            Store {
                records,
                kv,
                ids,
                clock,
                unsaved: HashSet::new(),
            },
            issues,
        )
    }

    pub fn records(&self) -> &SiteRecords {
        &self.records
    }

    pub fn config(&self) -> &SiteConfig {
        &self.records.config
    }

    /// Newest first
    pub fn posts(&self) -> &[Post] {
        &self.records.posts
    }

    /// Newest first
    pub fn inquiries(&self) -> &[Inquiry] {
        &self.records.inquiries
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    /// Whether `key` holds changes that storage has not accepted yet
    pub fn is_unsaved(&self, key: RecordKey) -> bool {
        self.unsaved.contains(&key)
    }

    /// Overwrite the site config.
    pub fn replace_config(&mut self, config: SiteConfig) -> Result<(), StoreError> {
        self.records.config = config;
        self.persist(RecordKey::Config)
    }

    /// Overwrite the post list. Id uniqueness is the caller's concern.
    pub fn replace_posts(&mut self, posts: Vec<Post>) -> Result<(), StoreError> {
        self.records.posts = posts;
        self.persist(RecordKey::Posts)
    }

    /// Record a public submission. Returns the new inquiry's id.
    pub fn submit_inquiry(
        &mut self,
        name: &str,
        contact: &str,
        message: &str,
    ) -> Result<String, CommandError> {
        let id = inquiry_ops::submit_inquiry(
            &mut self.records.inquiries,
            name,
            contact,
            message,
            self.ids.as_mut(),
            self.clock.as_ref(),
        )
        .map_err(Rejection::from)?;
        self.persist(RecordKey::Inquiries)?;
        Ok(id)
    }

    /// Complete or delete an inquiry. Returns whether anything changed;
    /// an unchanged list is not rewritten.
    pub fn apply_inquiry_action(
        &mut self,
        id: &str,
        action: InquiryAction,
    ) -> Result<bool, StoreError> {
        let changed = inquiry_ops::apply_inquiry_action(&mut self.records.inquiries, id, action);
        if changed {
            self.persist(RecordKey::Inquiries)?;
        }
        Ok(changed)
    }

    /// Create or update a post from a draft.
    pub fn save_post(&mut self, draft: &PostDraft) -> Result<PostSave, CommandError> {
        let mut posts = self.records.posts.clone();
        let saved = post_ops::save_post(&mut posts, draft, self.ids.as_mut(), self.clock.as_ref())
            .map_err(Rejection::from)?;
        self.replace_posts(posts)?;
        Ok(saved)
    }

    /// Remove a post. Returns whether one was removed.
    pub fn delete_post(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut posts = self.records.posts.clone();
        if !post_ops::delete_post(&mut posts, id) {
            return Ok(false);
        }
        self.replace_posts(posts)?;
        Ok(true)
    }

    /// Apply one command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        let name = command.name();
        let record = command.record();
        let outcome = match command {
            Command::SubmitInquiry {
                name,
                contact,
                message,
            } => Outcome::InquirySubmitted {
                id: self.submit_inquiry(&name, &contact, &message)?,
            },
            Command::CompleteInquiry { id } => {
                let changed = self.apply_inquiry_action(&id, InquiryAction::Complete)?;
                Outcome::InquiryCompleted { id, changed }
            }
            Command::DeleteInquiry { id } => {
                let changed = self.apply_inquiry_action(&id, InquiryAction::Delete)?;
                Outcome::InquiryDeleted { id, changed }
            }
            Command::SavePost(draft) => match self.save_post(&draft)? {
                PostSave::Created(id) => Outcome::PostCreated { id },
                PostSave::Updated(id) => Outcome::PostUpdated { id },
            },
            Command::DeletePost { id } => {
                let changed = self.delete_post(&id)?;
                Outcome::PostDeleted { id, changed }
            }
            Command::SaveConfig(config) => {
                self.replace_config(config)?;
                Outcome::ConfigSaved
            }
        };
        tracing::info!(
            command = name,
            record = record.key(),
            changed = outcome.changed(),
            "command applied"
        );
        Ok(outcome)
    }

    /// Re-read every record from storage, replacing in-memory state.
    /// Unsaved records are kept; see [`Store::reload_records`].
    pub fn reload(&mut self) -> Vec<LoadIssue> {
        self.reload_records(&RecordKey::ALL)
    }

    /// Re-read the given records from storage. A record whose last write
    /// failed keeps its in-memory value until a write succeeds.
    pub fn reload_records(&mut self, keys: &[RecordKey]) -> Vec<LoadIssue> {
        let mut issues = Vec::new();
        for &key in keys {
            if self.unsaved.contains(&key) {
                tracing::debug!(key = key.key(), "keeping unsaved record over stored copy");
                continue;
            }
            issues.extend(site_io::reload_record(&self.kv, &mut self.records, key));
        }
        issues
    }

    /// Write one record. A failed write keeps the in-memory change and
    /// copies the unwritten payload into the recovery log.
    fn persist(&mut self, key: RecordKey) -> Result<(), StoreError> {
        let Err(err) = site_io::save_one(&mut self.kv, &self.records, key) else {
            self.unsaved.remove(&key);
            return Ok(());
        };
        self.unsaved.insert(key);
        tracing::warn!(key = key.key(), error = %err, "write failed");
        if let Some(dir) = self.kv.dir() {
            let body = site_io::record_payload(&self.records, key).unwrap_or_default();
            recovery::log_recovery(
                dir,
                RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    category: RecoveryCategory::Write,
                    description: "record could not be written".to_string(),
                    fields: vec![
                        ("Key".to_string(), key.key().to_string()),
                        ("Error".to_string(), err.to_string()),
                    ],
                    body,
                },
            );
        }
        Err(err)
    }
}

impl Store {
    /// Open the file-backed store of a site, logging any load fallbacks to
    /// the recovery log.
    pub fn open_site(paths: &SitePaths, settings: &Settings) -> Self {
        let kv: Box<dyn KeyValueStore> = Box::new(FileStore::new(&paths.site_dir));
        let (store, issues) = Store::open(
            kv,
            ids::generator_for(settings.ids.strategy),
            Box::new(SystemClock),
        );
        site_io::log_load_issues(&paths.site_dir, &issues);
        store
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::io::kv::MemoryStore;
    use crate::model::inquiry::{InquiryStatus, default_inquiries};
    use crate::model::post::{Category, default_posts};
    use crate::ops::ids::{FixedClock, SequentialIds};
    use crate::ops::inquiry_ops::InquiryError;
    use crate::ops::post_ops::PostError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn memory_store() -> Store<MemoryStore> {
        store_over(MemoryStore::new())
    }

    fn store_over(kv: MemoryStore) -> Store<MemoryStore> {
        let (store, issues) = Store::open(
            kv,
            Box::new(SequentialIds::new("n")),
            Box::new(FixedClock(today())),
        );
        assert!(issues.is_empty());
        store
    }

    fn writes(store: &Store<MemoryStore>) -> [usize; 3] {
        RecordKey::ALL.map(|k| store.kv().write_count(k.key()))
    }

    #[test]
    fn starts_from_defaults() {
        let store = memory_store();
        assert_eq!(store.records(), &SiteRecords::default());
        assert_eq!(writes(&store), [0, 0, 0]);
    }

    #[test]
    fn submit_writes_only_inquiries() {
        let mut store = memory_store();
        let id = store.submit_inquiry("Hong", "010-1111-2222", "").unwrap();

        assert_eq!(id, "n1");
        assert_eq!(store.inquiries()[0].id, "n1");
        assert_eq!(store.inquiries()[0].status, InquiryStatus::Pending);
        assert_eq!(store.inquiries()[0].date, "2024-06-01");
        assert_eq!(writes(&store), [0, 0, 1]);

        let persisted: Vec<Inquiry> =
            serde_json::from_str(store.kv().raw("fc_inquiries").unwrap()).unwrap();
        assert_eq!(persisted, store.inquiries());
    }

    #[test]
    fn rejected_submission_changes_and_writes_nothing() {
        let mut store = memory_store();
        let err = store.submit_inquiry("", "010", "hi").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Rejected(Rejection::Inquiry(InquiryError::MissingName))
        ));
        let err = store.submit_inquiry("Hong", "", "hi").unwrap_err();
        assert_eq!(err.to_string(), "contact is required");

        assert_eq!(store.inquiries(), default_inquiries());
        assert_eq!(writes(&store), [0, 0, 0]);
    }

    #[test]
    fn noop_inquiry_actions_skip_the_write() {
        let mut store = memory_store();
        assert!(store.apply_inquiry_action("1", InquiryAction::Complete).unwrap());
        assert!(!store.apply_inquiry_action("1", InquiryAction::Complete).unwrap());
        assert!(!store.apply_inquiry_action("nope", InquiryAction::Delete).unwrap());
        assert_eq!(writes(&store), [0, 0, 1]);
        assert_eq!(store.inquiries()[0].status, InquiryStatus::Completed);
    }

    #[test]
    fn post_commands_write_only_posts() {
        let mut store = memory_store();
        let draft = PostDraft {
            title: "Grand opening".into(),
            content: "Doors open at noon".into(),
            ..PostDraft::new_post()
        };
        let outcome = store.execute(Command::SavePost(draft)).unwrap();
        assert_eq!(outcome, Outcome::PostCreated { id: "n1".into() });
        assert_eq!(store.posts().len(), 4);
        assert_eq!(store.posts()[0].category, Category::Event);

        let outcome = store.execute(Command::DeletePost { id: "2".into() }).unwrap();
        assert_eq!(
            outcome,
            Outcome::PostDeleted {
                id: "2".into(),
                changed: true
            }
        );
        assert_eq!(writes(&store), [0, 2, 0]);
    }

    #[test]
    fn invalid_post_draft_is_rejected() {
        let mut store = memory_store();
        let mut draft = PostDraft::from_post(&default_posts()[0]);
        draft.content = "   ".into();
        let err = store.execute(Command::SavePost(draft)).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Rejected(Rejection::Post(PostError::MissingContent))
        ));
        assert_eq!(store.posts(), default_posts());
        assert_eq!(writes(&store), [0, 0, 0]);
    }

    #[test]
    fn save_config_replaces_wholesale() {
        let mut store = memory_store();
        let mut config = SiteConfig::default();
        config.site_name = "CLARK".into();
        config.primary_color = "#112233".into();
        assert_eq!(
            store.execute(Command::SaveConfig(config.clone())).unwrap(),
            Outcome::ConfigSaved
        );
        assert_eq!(store.config(), &config);
        assert_eq!(writes(&store), [1, 0, 0]);
    }

    #[test]
    fn failed_write_keeps_in_memory_state() {
        let mut store = memory_store();
        store.kv_mut().fail_writes = true;

        let err = store
            .execute(Command::SubmitInquiry {
                name: "Hong".into(),
                contact: "010".into(),
                message: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, CommandError::Storage(StoreError::Write { .. })));
        assert_eq!(store.inquiries().len(), 2);
        assert_eq!(store.inquiries()[0].name, "Hong");
        assert!(store.kv().raw("fc_inquiries").is_none());
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let mut store = memory_store();
        store.submit_inquiry("A", "B", "").unwrap();

        let posts = vec![default_posts().remove(2)];
        store
            .kv_mut()
            .set("fc_posts", &serde_json::to_string(&posts).unwrap())
            .unwrap();
        let issues = store.reload();
        assert!(issues.is_empty());
        assert_eq!(store.posts(), posts);
        assert_eq!(store.inquiries().len(), 2);
    }

    #[test]
    fn reload_keeps_records_whose_write_failed() {
        let mut store = store_over(MemoryStore::new().failing("fc_config"));
        let mut config = SiteConfig::default();
        config.slogan = "unsaved slogan".into();
        assert!(store.execute(Command::SaveConfig(config)).is_err());
        assert!(store.is_unsaved(RecordKey::Config));

        // A later write to another record goes through
        store.submit_inquiry("Hong", "010", "").unwrap();
        assert_eq!(writes(&store), [0, 0, 1]);

        assert!(store.reload().is_empty());
        assert_eq!(store.config().slogan, "unsaved slogan");
        assert_eq!(store.inquiries()[0].name, "Hong");
        assert_eq!(store.inquiries().len(), 2);
        assert!(store.kv().raw("fc_config").is_none());
    }

    #[test]
    fn successful_write_clears_unsaved_state() {
        let mut store = store_over(MemoryStore::new().failing("fc_config"));
        let mut config = SiteConfig::default();
        config.slogan = "first try".into();
        assert!(store.replace_config(config.clone()).is_err());

        store.kv_mut().recover("fc_config");
        config.slogan = "second try".into();
        store.replace_config(config).unwrap();
        assert!(!store.is_unsaved(RecordKey::Config));
        assert_eq!(writes(&store), [1, 0, 0]);

        let mut external = SiteConfig::default();
        external.slogan = "edited elsewhere".into();
        store
            .kv_mut()
            .set("fc_config", &serde_json::to_string(&external).unwrap())
            .unwrap();
        store.reload();
        assert_eq!(store.config(), &external);
    }

    #[test]
    fn reload_records_reads_only_named_keys() {
        let mut store = memory_store();
        store.kv_mut().set("fc_posts", "[]").unwrap();
        store.kv_mut().set("fc_inquiries", "[]").unwrap();

        assert!(store.reload_records(&[RecordKey::Posts]).is_empty());
        assert!(store.posts().is_empty());
        assert_eq!(store.inquiries(), default_inquiries());
    }

    #[test]
    fn failed_file_write_lands_in_recovery_log() {
        let tmp = TempDir::new().unwrap();
        let site_dir = tmp.path().join("site");
        std::fs::create_dir_all(&site_dir).unwrap();
        let paths = SitePaths::new(tmp.path().to_path_buf());
        let mut store = Store::open_site(&paths, &Settings::default());

        // A directory where the payload file should be makes the rename fail
        std::fs::create_dir(site_dir.join("fc_config.json")).unwrap();
        let mut config = SiteConfig::default();
        config.slogan = "unsaved slogan".into();
        assert!(store.replace_config(config).is_err());
        assert_eq!(store.config().slogan, "unsaved slogan");

        let entries = recovery::read_recovery_entries(&site_dir, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Write);
        assert!(entries[0].body.contains("unsaved slogan"));
    }
}
