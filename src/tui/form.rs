use crate::model::{Category, ConfigField, PostDraft, SiteConfig};
use crate::util::unicode;

/// A single-line text input with a grapheme-aligned byte cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Byte offset into `value`, always on a grapheme boundary
    pub cursor: usize,
    pub required: bool,
}

impl TextField {
    pub fn new(label: &'static str, required: bool) -> Self {
        TextField {
            label,
            value: String::new(),
            cursor: 0,
            required,
        }
    }

    /// Replace the value and put the cursor at the end
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text. Line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) {
        let clean = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.value.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.value.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.value.drain(self.cursor..next);
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.value, self.cursor);
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Kill to start of line
    pub fn delete_to_start(&mut self) {
        self.value.drain(..self.cursor);
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_word_left(&mut self) {
        self.cursor = unicode::word_boundary_left(&self.value, self.cursor);
    }

    pub fn move_word_right(&mut self) {
        self.cursor = unicode::word_boundary_right(&self.value, self.cursor);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Display column of the cursor in terminal cells
    pub fn cursor_col(&self) -> usize {
        unicode::display_width(&self.value[..self.cursor.min(self.value.len())])
    }

    /// Required but blank
    pub fn is_missing(&self) -> bool {
        self.required && self.value.trim().is_empty()
    }
}

/// An ordered set of text fields with one focused field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Form { fields, focus: 0 }
    }

    /// The public lead-capture form: name, contact, message
    pub fn inquiry() -> Self {
        Form::new(vec![
            TextField::new("Name", true),
            TextField::new("Contact", true),
            TextField::new("Message", false),
        ])
    }

    /// A draft of every site config field, in display order
    pub fn settings(config: &SiteConfig) -> Self {
        let fields = ConfigField::ALL
            .iter()
            .map(|field| {
                let mut text = TextField::new(field.label(), false);
                text.set(config.get(*field));
                text
            })
            .collect();
        Form::new(fields)
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }

    pub fn focused(&self) -> Option<&TextField> {
        self.fields.get(self.focus)
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focus)
    }

    pub fn is_last(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focus = 0;
    }

    /// Collect a settings draft back into a config. Field order follows
    /// [`ConfigField::ALL`].
    pub fn to_config(&self) -> SiteConfig {
        let mut config = SiteConfig::default();
        for (i, field) in ConfigField::ALL.iter().enumerate() {
            config.set(*field, self.value(i).to_string());
        }
        config
    }
}

/// Focusable slots of the post editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Category,
    ImageUrl,
    Content,
}

impl PostField {
    pub const ALL: [PostField; 4] = [
        PostField::Title,
        PostField::Category,
        PostField::ImageUrl,
        PostField::Content,
    ];

    pub fn next(self) -> Self {
        match self {
            PostField::Title => PostField::Category,
            PostField::Category => PostField::ImageUrl,
            PostField::ImageUrl => PostField::Content,
            PostField::Content => PostField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PostField::Title => PostField::Content,
            PostField::Category => PostField::Title,
            PostField::ImageUrl => PostField::Category,
            PostField::Content => PostField::ImageUrl,
        }
    }
}

/// Modal editor state for creating or editing a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEditor {
    /// Empty for a new post
    pub id: String,
    pub title: TextField,
    pub category: Category,
    pub image_url: TextField,
    pub content: TextField,
    pub focus: PostField,
}

impl PostEditor {
    pub fn from_draft(draft: &PostDraft) -> Self {
        let mut title = TextField::new("Title", true);
        title.set(&draft.title);
        let mut image_url = TextField::new("Image URL", false);
        image_url.set(&draft.image_url);
        let mut content = TextField::new("Content", true);
        content.set(&draft.content);
        PostEditor {
            id: draft.id.clone(),
            title,
            category: draft.category.unwrap_or(Category::Event),
            image_url,
            content,
            focus: PostField::Title,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// The text field under focus, or None while the category is focused
    pub fn focused_text_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            PostField::Title => Some(&mut self.title),
            PostField::Category => None,
            PostField::ImageUrl => Some(&mut self.image_url),
            PostField::Content => Some(&mut self.content),
        }
    }

    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            id: self.id.clone(),
            title: self.title.value.clone(),
            content: self.content.value.clone(),
            category: Some(self.category),
            image_url: self.image_url.value.clone(),
        }
    }
}
