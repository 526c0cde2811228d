use std::fmt;

use serde::{Deserialize, Serialize};

/// Inquiry handling status. Only moves Pending → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquiryStatus {
    Pending,
    Completed,
}

impl InquiryStatus {
    pub fn parse_status(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(InquiryStatus::Pending),
            "completed" | "done" => Some(InquiryStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InquiryStatus::Pending => write!(f, "Pending"),
            InquiryStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A lead captured by the public contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub message: String,
    pub status: InquiryStatus,
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
}

/// Admin action on an existing inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryAction {
    Complete,
    Delete,
}

/// Seed inquiries used when nothing has been persisted yet
pub fn default_inquiries() -> Vec<Inquiry> {
    vec![Inquiry {
        id: "1".into(),
        name: "홍길동".into(),
        contact: "010-1234-5678".into(),
        message: "VIP 멤버십 가입 조건이 궁금합니다.".into(),
        status: InquiryStatus::Pending,
        date: "2024-05-21".into(),
    }]
}
