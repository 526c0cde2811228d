use crate::io::site_io::RecordKey;
use crate::model::inquiry::InquiryAction;
use crate::model::post::PostDraft;
use crate::model::site_config::SiteConfig;
use crate::ops::inquiry_ops::InquiryError;
use crate::ops::post_ops::PostError;

/// Every state change the views can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SubmitInquiry {
        name: String,
        contact: String,
        message: String,
    },
    CompleteInquiry { id: String },
    DeleteInquiry { id: String },
    SavePost(PostDraft),
    DeletePost { id: String },
    SaveConfig(SiteConfig),
}

impl Command {
    /// The persisted record this command rewrites
    pub fn record(&self) -> RecordKey {
        match self {
            Command::SubmitInquiry { .. }
            | Command::CompleteInquiry { .. }
            | Command::DeleteInquiry { .. } => RecordKey::Inquiries,
            Command::SavePost(_) | Command::DeletePost { .. } => RecordKey::Posts,
            Command::SaveConfig(_) => RecordKey::Config,
        }
    }

    /// Admin inquiry command for an action
    pub fn inquiry_action(id: &str, action: InquiryAction) -> Self {
        match action {
            InquiryAction::Complete => Command::CompleteInquiry { id: id.to_string() },
            InquiryAction::Delete => Command::DeleteInquiry { id: id.to_string() },
        }
    }

    /// Short name used in log events
    pub fn name(&self) -> &'static str {
        match self {
            Command::SubmitInquiry { .. } => "submit_inquiry",
            Command::CompleteInquiry { .. } => "complete_inquiry",
            Command::DeleteInquiry { .. } => "delete_inquiry",
            Command::SavePost(_) => "save_post",
            Command::DeletePost { .. } => "delete_post",
            Command::SaveConfig(_) => "save_config",
        }
    }
}

/// What an accepted command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    InquirySubmitted { id: String },
    /// `changed` is false when the id was unknown or already completed
    InquiryCompleted { id: String, changed: bool },
    InquiryDeleted { id: String, changed: bool },
    PostCreated { id: String },
    PostUpdated { id: String },
    PostDeleted { id: String, changed: bool },
    ConfigSaved,
}

impl Outcome {
    /// Whether the in-memory records were modified
    pub fn changed(&self) -> bool {
        match self {
            Outcome::InquiryCompleted { changed, .. }
            | Outcome::InquiryDeleted { changed, .. }
            | Outcome::PostDeleted { changed, .. } => *changed,
            _ => true,
        }
    }
}

/// Why a command was refused. Refused commands never change state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error(transparent)]
    Inquiry(#[from] InquiryError),
    #[error(transparent)]
    Post(#[from] PostError),
}
