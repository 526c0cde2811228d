use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::{Category, ConfigField, Inquiry, InquiryStatus, Post, SiteConfig, SiteRecords};
use crate::ops::command::Outcome;
use crate::ops::search::{HitKind, SearchHit};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// Result of a write command
#[derive(Serialize)]
pub struct OutcomeJson {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub changed: bool,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub kind: &'static str,
    pub id: String,
    pub field: &'static str,
    /// Title of the post or name of the inquirer
    pub label: String,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, String)>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

pub fn outcome_to_json(outcome: &Outcome) -> OutcomeJson {
    let (action, id) = match outcome {
        Outcome::InquirySubmitted { id } => ("inquiry_submitted", Some(id)),
        Outcome::InquiryCompleted { id, .. } => ("inquiry_completed", Some(id)),
        Outcome::InquiryDeleted { id, .. } => ("inquiry_deleted", Some(id)),
        Outcome::PostCreated { id } => ("post_created", Some(id)),
        Outcome::PostUpdated { id } => ("post_updated", Some(id)),
        Outcome::PostDeleted { id, .. } => ("post_deleted", Some(id)),
        Outcome::ConfigSaved => ("config_saved", None),
    };
    OutcomeJson {
        action,
        id: id.cloned(),
        changed: outcome.changed(),
    }
}

pub fn hit_to_json(hit: &SearchHit, records: &SiteRecords) -> SearchHitJson {
    SearchHitJson {
        kind: hit_kind_name(hit.kind),
        id: hit.id.clone(),
        field: hit.field.label(),
        label: hit_label(hit, records),
    }
}

pub fn recovery_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn category_char(category: Category) -> char {
    match category {
        Category::Event => 'E',
        Category::Notice => 'N',
        Category::Guide => 'G',
    }
}

fn status_char(status: InquiryStatus) -> char {
    match status {
        InquiryStatus::Pending => ' ',
        InquiryStatus::Completed => 'x',
    }
}

fn hit_kind_name(kind: HitKind) -> &'static str {
    match kind {
        HitKind::Post => "post",
        HitKind::Inquiry => "inquiry",
    }
}

fn hit_label(hit: &SearchHit, records: &SiteRecords) -> String {
    match hit.kind {
        HitKind::Post => records
            .find_post(&hit.id)
            .map(|p| p.title.clone())
            .unwrap_or_default(),
        HitKind::Inquiry => records
            .find_inquiry(&hit.id)
            .map(|i| i.name.clone())
            .unwrap_or_default(),
    }
}

/// Format a post as a one-line summary
pub fn format_post_line(post: &Post) -> String {
    format!(
        "[{}] {} {} {}",
        category_char(post.category),
        post.id,
        post.date,
        post.title
    )
}

/// Format a post with all of its fields
pub fn format_post_detail(post: &Post) -> Vec<String> {
    let mut lines = vec![
        format_post_line(post),
        format!("category: {}", post.category),
        format!("date: {}", post.date),
    ];
    if let Some(url) = &post.image_url {
        lines.push(format!("image: {}", url));
    }
    lines.push("content:".to_string());
    for line in post.content.lines() {
        lines.push(format!("  {}", line));
    }
    lines
}

/// Format an inquiry, with its message indented below when present
pub fn format_inquiry(inquiry: &Inquiry) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}] {} {} {} <{}>",
        status_char(inquiry.status),
        inquiry.id,
        inquiry.date,
        inquiry.name,
        inquiry.contact
    )];
    for line in inquiry.message.lines().filter(|l| !l.trim().is_empty()) {
        lines.push(format!("    {}", line));
    }
    lines
}

/// Format the site config as `key: value` lines in display order
pub fn format_config(config: &SiteConfig) -> Vec<String> {
    let width = ConfigField::ALL
        .iter()
        .map(|f| f.key().len())
        .max()
        .unwrap_or(0);
    ConfigField::ALL
        .iter()
        .map(|f| format!("{:<w$}  {}", format!("{}:", f.key()), config.get(*f), w = width + 1))
        .collect()
}

pub fn format_search_hit(hit: &SearchHit, records: &SiteRecords) -> String {
    format!(
        "[{}:{}] {} (in {})",
        hit_kind_name(hit.kind),
        hit.id,
        hit_label(hit, records),
        hit.field.label()
    )
}

/// Format a recovery entry as printed by `sc recovery`
pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{} [{}] {}",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    for line in entry.body.lines() {
        lines.push(format!("  | {}", line));
    }
    lines
}

/// Parse a category string into Category
pub fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse_category(s)
        .ok_or_else(|| format!("unknown category '{}' (expected: event, notice, guide)", s))
}

/// Parse a status string into InquiryStatus
pub fn parse_status(s: &str) -> Result<InquiryStatus, String> {
    InquiryStatus::parse_status(s)
        .ok_or_else(|| format!("unknown status '{}' (expected: pending, completed)", s))
}

/// Parse a config field name
pub fn parse_config_field(s: &str) -> Result<ConfigField, String> {
    ConfigField::parse_field(s).ok_or_else(|| {
        let keys: Vec<&str> = ConfigField::ALL.iter().map(|f| f.key()).collect();
        format!("unknown field '{}' (expected: {})", s, keys.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_inquiries, default_posts};
    use crate::ops::search::{build_search_regex, search_records};
    use insta::assert_snapshot;

    #[test]
    fn post_line() {
        let posts = default_posts();
        assert_snapshot!(format_post_line(&posts[1]), @"[G] 2 2024-05-18 VIP 골프 & 호텔 패키지 안내");
    }

    #[test]
    fn post_detail_lists_fields() {
        let posts = default_posts();
        let lines = format_post_detail(&posts[2]);
        assert_eq!(lines[1], "category: Notice");
        assert_eq!(lines[3], "image: https://picsum.photos/seed/security/800/400");
        assert_eq!(lines[4], "content:");
        assert!(lines[5].starts_with("  안정적인 서비스"));
    }

    #[test]
    fn inquiry_lines() {
        let mut inquiry = default_inquiries().remove(0);
        let lines = format_inquiry(&inquiry);
        assert_snapshot!(&lines[0], @"[ ] 1 2024-05-21 홍길동 <010-1234-5678>");
        assert_eq!(lines[1], "    VIP 멤버십 가입 조건이 궁금합니다.");

        inquiry.status = InquiryStatus::Completed;
        inquiry.message.clear();
        assert_eq!(format_inquiry(&inquiry), vec!["[x] 1 2024-05-21 홍길동 <010-1234-5678>"]);
    }

    #[test]
    fn config_lines_align() {
        let lines = format_config(&SiteConfig::default());
        assert_eq!(lines.len(), 7);
        assert_snapshot!(&lines[0], @"siteName:         FANTASTIC CLARK");
        assert_snapshot!(&lines[5], @"primaryColor:     #8A2BE2");
    }

    #[test]
    fn search_hit_line() {
        let records = SiteRecords::default();
        let re = build_search_regex("vip").unwrap();
        let hits = search_records(&records, &re);
        let lines: Vec<String> = hits.iter().map(|h| format_search_hit(h, &records)).collect();
        assert!(lines.contains(&"[post:2] VIP 골프 & 호텔 패키지 안내 (in title)".to_string()));
        assert!(lines.contains(&"[inquiry:1] 홍길동 (in message)".to_string()));
    }

    #[test]
    fn outcome_json_shape() {
        let json = serde_json::to_string(&outcome_to_json(&Outcome::InquiryCompleted {
            id: "7".into(),
            changed: false,
        }))
        .unwrap();
        assert_eq!(json, r#"{"action":"inquiry_completed","id":"7","changed":false}"#);
        let json = serde_json::to_string(&outcome_to_json(&Outcome::ConfigSaved)).unwrap();
        assert_eq!(json, r#"{"action":"config_saved","changed":true}"#);
    }

    #[test]
    fn parse_errors_list_choices() {
        assert_eq!(parse_category("Guide"), Ok(Category::Guide));
        assert_eq!(
            parse_category("promo").unwrap_err(),
            "unknown category 'promo' (expected: event, notice, guide)"
        );
        assert!(parse_status("done").is_ok());
        assert!(parse_config_field("favicon").unwrap_err().contains("siteName"));
    }
}
