use crate::model::post::{Category, Post, PostDraft};
use crate::ops::ids::{Clock, IdGenerator};

/// Error type for post operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostError {
    #[error("title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
    #[error("category is required (Event, Notice, or Guide)")]
    MissingCategory,
}

/// Check a draft's required fields, returning its category.
pub fn validate_draft(draft: &PostDraft) -> Result<Category, PostError> {
    if draft.title.trim().is_empty() {
        return Err(PostError::MissingTitle);
    }
    if draft.content.trim().is_empty() {
        return Err(PostError::MissingContent);
    }
    draft.category.ok_or(PostError::MissingCategory)
}

/// Result of merging a draft into the post list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSave {
    Created(String),
    Updated(String),
}

impl PostSave {
    pub fn id(&self) -> &str {
        match self {
            PostSave::Created(id) | PostSave::Updated(id) => id,
        }
    }
}

/// Merge a draft into `posts`.
///
/// A draft whose id matches an existing post replaces it in place, keeping
/// its position and original date. Any other draft (including an empty id)
/// becomes a new post with a fresh id and today's date, placed first.
pub fn save_post(
    posts: &mut Vec<Post>,
    draft: &PostDraft,
    ids: &mut dyn IdGenerator,
    clock: &dyn Clock,
) -> Result<PostSave, PostError> {
    let category = validate_draft(draft)?;
    let image_url = Some(draft.image_url.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if !draft.id.is_empty()
        && let Some(existing) = posts.iter_mut().find(|p| p.id == draft.id)
    {
        existing.title = draft.title.clone();
        existing.content = draft.content.clone();
        existing.category = category;
        existing.image_url = image_url;
        return Ok(PostSave::Updated(draft.id.clone()));
    }

    let id = loop {
        let candidate = ids.next_id();
        if !candidate.is_empty() && !posts.iter().any(|p| p.id == candidate) {
            break candidate;
        }
    };
    posts.insert(
        0,
        Post {
            id: id.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            category,
            date: clock.today_str(),
            image_url,
        },
    );
    Ok(PostSave::Created(id))
}

/// Remove the post with `id`. Returns true if one was removed.
pub fn delete_post(posts: &mut Vec<Post>, id: &str) -> bool {
    let before = posts.len();
    posts.retain(|p| p.id != id);
    posts.len() != before
}

/// Posts in `category`, preserving feed order
pub fn posts_in_category(posts: &[Post], category: Category) -> Vec<&Post> {
    posts.iter().filter(|p| p.category == category).collect()
}
