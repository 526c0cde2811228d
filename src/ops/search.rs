use std::ops::Range;

use regex::Regex;

use crate::model::site::SiteRecords;

/// Which record a hit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Post,
    Inquiry,
}

/// Which field of a post or inquiry matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Content,
    Name,
    Contact,
    Message,
}

impl MatchField {
    pub fn label(self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Content => "content",
            MatchField::Name => "name",
            MatchField::Contact => "contact",
            MatchField::Message => "message",
        }
    }
}

/// A search hit for one field of one record
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub kind: HitKind,
    pub id: String,
    pub field: MatchField,
    pub spans: Vec<Range<usize>>,
}

/// Compile a case-insensitive pattern. Invalid regex syntax falls back to a
/// literal match of the input.
pub fn build_search_regex(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search posts (title, content) then inquiries (name, contact, message),
/// each in collection order.
pub fn search_records(records: &SiteRecords, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for post in &records.posts {
        for (field, text) in [
            (MatchField::Title, &post.title),
            (MatchField::Content, &post.content),
        ] {
            let spans = find_matches(re, text);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    kind: HitKind::Post,
                    id: post.id.clone(),
                    field,
                    spans,
                });
            }
        }
    }

    for inquiry in &records.inquiries {
        for (field, text) in [
            (MatchField::Name, &inquiry.name),
            (MatchField::Contact, &inquiry.contact),
            (MatchField::Message, &inquiry.message),
        ] {
            let spans = find_matches(re, text);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    kind: HitKind::Inquiry,
                    id: inquiry.id.clone(),
                    field,
                    spans,
                });
            }
        }
    }

    hits
}
