use crate::model::inquiry::{Inquiry, InquiryAction, InquiryStatus};
use crate::ops::ids::{Clock, IdGenerator};

/// Error type for inquiry submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InquiryError {
    #[error("name is required")]
    MissingName,
    #[error("contact is required")]
    MissingContact,
}

/// Check the required fields of a public submission.
pub fn validate_submission(name: &str, contact: &str) -> Result<(), InquiryError> {
    if name.trim().is_empty() {
        return Err(InquiryError::MissingName);
    }
    if contact.trim().is_empty() {
        return Err(InquiryError::MissingContact);
    }
    Ok(())
}

/// Record a public submission at the top of the list.
/// Returns the id assigned to the new inquiry.
pub fn submit_inquiry(
    inquiries: &mut Vec<Inquiry>,
    name: &str,
    contact: &str,
    message: &str,
    ids: &mut dyn IdGenerator,
    clock: &dyn Clock,
) -> Result<String, InquiryError> {
    validate_submission(name, contact)?;

    let id = fresh_id(inquiries, ids);
    inquiries.insert(
        0,
        Inquiry {
            id: id.clone(),
            name: name.to_string(),
            contact: contact.to_string(),
            message: message.to_string(),
            status: InquiryStatus::Pending,
            date: clock.today_str(),
        },
    );
    Ok(id)
}

/// Apply an admin action to the inquiry with `id`.
/// Returns true if the list changed; unknown ids are a no-op.
pub fn apply_inquiry_action(inquiries: &mut Vec<Inquiry>, id: &str, action: InquiryAction) -> bool {
    match action {
        InquiryAction::Complete => match inquiries.iter_mut().find(|i| i.id == id) {
            Some(inquiry) if inquiry.status != InquiryStatus::Completed => {
                inquiry.status = InquiryStatus::Completed;
                true
            }
            _ => false,
        },
        InquiryAction::Delete => {
            let before = inquiries.len();
            inquiries.retain(|i| i.id != id);
            inquiries.len() != before
        }
    }
}

/// Draw ids until one is unused in `inquiries`. Persisted data may hold
/// ids from another generator, so a collision is possible in principle.
fn fresh_id(inquiries: &[Inquiry], ids: &mut dyn IdGenerator) -> String {
    loop {
        let id = ids.next_id();
        if !id.is_empty() && !inquiries.iter().any(|i| i.id == id) {
            return id;
        }
    }
}
