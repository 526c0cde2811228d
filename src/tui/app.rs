use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::kv::StoreError;
use crate::io::settings_io::read_settings;
use crate::io::site_io::{self, RecordKey, discover_site};
use crate::io::watcher::{FileEvent, SiteWatcher};
use crate::model::{Inquiry, InquiryAction, InquiryStatus, Post, PostDraft, Settings, SitePaths};
use crate::ops::command::{Command, Outcome, Rejection};
use crate::ops::inquiry_ops::InquiryError;
use crate::ops::post_ops::PostError;
use crate::store::{CommandError, Store};
use crate::util::logging;

use super::form::{Form, PostEditor, PostField};
use super::input;
use super::render;
use super::theme::Theme;

/// Which of the two surfaces is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Public,
    Admin,
}

/// Admin panel tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Inquiries,
    Posts,
    Settings,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Inquiries, AdminTab::Posts, AdminTab::Settings];

    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Inquiries => "Inquiries",
            AdminTab::Posts => "Posts",
            AdminTab::Settings => "Settings",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AdminTab::Inquiries => AdminTab::Posts,
            AdminTab::Posts => AdminTab::Settings,
            AdminTab::Settings => AdminTab::Inquiries,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AdminTab::Inquiries => AdminTab::Settings,
            AdminTab::Posts => AdminTab::Inquiries,
            AdminTab::Settings => AdminTab::Posts,
        }
    }
}

/// The form receiving keystrokes in Edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    InquiryForm,
    PostEditor,
    Settings,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Edit(EditTarget),
    /// y/n prompt; see `App::confirm_state`
    Confirm,
    /// Blocking notice; see `App::notice`
    Notice,
    Help,
}

/// Action awaiting a y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePost { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message that must be acknowledged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Mode restored when the notice is dismissed
    pub return_mode: Mode,
}

pub const INQUIRY_RECEIVED: &str = "Inquiry received. We will contact you shortly.";
pub const INQUIRY_INCOMPLETE: &str = "Please enter your name and contact.";
pub const SETTINGS_SAVED: &str = "Settings saved.";

/// Main application state
pub struct App {
    pub store: Store,
    pub settings: Settings,
    /// `site/` directory; None when running without a site on disk (tests)
    pub site_dir: Option<PathBuf>,
    pub view: ViewMode,
    pub admin_tab: AdminTab,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Scroll offset (first visible row) of the public page
    pub public_scroll: usize,
    pub inquiry_cursor: usize,
    pub inquiry_scroll: usize,
    pub post_cursor: usize,
    pub post_scroll: usize,
    pub help_scroll: usize,
    /// Public lead-capture draft
    pub inquiry_form: Form,
    /// Open post editor modal
    pub post_editor: Option<PostEditor>,
    /// Settings draft; `focus` is the settings cursor
    pub settings_form: Form,
    /// Field value before the current settings edit, restored on Esc
    pub settings_edit_original: Option<String>,
    pub confirm_state: Option<ConfirmState>,
    pub notice: Option<Notice>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(store: Store, settings: Settings) -> Self {
        let theme = Theme::for_site(store.config(), &settings.ui);
        let settings_form = Form::settings(store.config());
        App {
            store,
            settings,
            site_dir: None,
            view: ViewMode::Public,
            admin_tab: AdminTab::Inquiries,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            public_scroll: 0,
            inquiry_cursor: 0,
            inquiry_scroll: 0,
            post_cursor: 0,
            post_scroll: 0,
            help_scroll: 0,
            inquiry_form: Form::inquiry(),
            post_editor: None,
            settings_form,
            settings_edit_original: None,
            confirm_state: None,
            notice: None,
            status_message: None,
            status_is_error: false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.store.records().pending_count()
    }

    pub fn selected_inquiry(&self) -> Option<&Inquiry> {
        self.store.inquiries().get(self.inquiry_cursor)
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.store.posts().get(self.post_cursor)
    }

    pub fn refresh_theme(&mut self) {
        self.theme = Theme::for_site(self.store.config(), &self.settings.ui);
    }

    /// Keep list cursors inside their collections
    pub fn clamp_cursors(&mut self) {
        self.inquiry_cursor = self
            .inquiry_cursor
            .min(self.store.inquiries().len().saturating_sub(1));
        self.post_cursor = self.post_cursor.min(self.store.posts().len().saturating_sub(1));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    fn set_storage_error(&mut self, err: &StoreError) {
        self.status_message = Some(format!("not saved: {}", err));
        self.status_is_error = true;
    }

    pub fn show_notice(&mut self, kind: NoticeKind, message: &str, return_mode: Mode) {
        self.notice = Some(Notice {
            kind,
            message: message.to_string(),
            return_mode,
        });
        self.mode = Mode::Notice;
    }

    pub fn dismiss_notice(&mut self) {
        let notice = self.notice.take();
        self.mode = notice.map_or(Mode::Navigate, |n| n.return_mode);
    }

    /// Flip between the public page and the admin panel. Entering the
    /// admin panel starts a fresh settings draft from the stored config.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewMode::Public => {
                self.settings_form = Form::settings(self.store.config());
                ViewMode::Admin
            }
            ViewMode::Admin => ViewMode::Public,
        };
        self.mode = Mode::Navigate;
    }

    fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        self.store.execute(command)
    }

    // -- public ------------------------------------------------------------

    pub fn begin_inquiry_edit(&mut self) {
        self.mode = Mode::Edit(EditTarget::InquiryForm);
    }

    /// Discard the lead-capture draft
    pub fn cancel_inquiry_edit(&mut self) {
        self.inquiry_form.clear();
        self.mode = Mode::Navigate;
    }

    pub fn submit_inquiry_form(&mut self) {
        let command = Command::SubmitInquiry {
            name: self.inquiry_form.value(0).to_string(),
            contact: self.inquiry_form.value(1).to_string(),
            message: self.inquiry_form.value(2).to_string(),
        };
        match self.execute(command) {
            Ok(_) => {
                self.inquiry_form.clear();
                self.show_notice(NoticeKind::Info, INQUIRY_RECEIVED, Mode::Navigate);
            }
            Err(CommandError::Rejected(reason)) => {
                self.inquiry_form.focus = match reason {
                    Rejection::Inquiry(InquiryError::MissingContact) => 1,
                    _ => 0,
                };
                self.show_notice(
                    NoticeKind::Error,
                    INQUIRY_INCOMPLETE,
                    Mode::Edit(EditTarget::InquiryForm),
                );
            }
            Err(CommandError::Storage(e)) => {
                self.inquiry_form.clear();
                self.mode = Mode::Navigate;
                self.set_storage_error(&e);
            }
        }
    }

    // -- admin: inquiries --------------------------------------------------

    /// Mark the selected inquiry completed (pending inquiries only)
    pub fn complete_selected_inquiry(&mut self) {
        let Some(inquiry) = self.selected_inquiry() else {
            return;
        };
        if inquiry.status != InquiryStatus::Pending {
            self.set_status("already completed");
            return;
        }
        let id = inquiry.id.clone();
        match self.execute(Command::inquiry_action(&id, InquiryAction::Complete)) {
            Ok(_) => self.set_status("inquiry completed"),
            Err(CommandError::Storage(e)) => self.set_storage_error(&e),
            Err(CommandError::Rejected(_)) => {}
        }
    }

    pub fn delete_selected_inquiry(&mut self) {
        let Some(id) = self.selected_inquiry().map(|i| i.id.clone()) else {
            return;
        };
        match self.execute(Command::inquiry_action(&id, InquiryAction::Delete)) {
            Ok(_) => self.set_status("inquiry deleted"),
            Err(CommandError::Storage(e)) => self.set_storage_error(&e),
            Err(CommandError::Rejected(_)) => {}
        }
        self.clamp_cursors();
    }

    // -- admin: posts ------------------------------------------------------

    pub fn open_new_post(&mut self) {
        self.post_editor = Some(PostEditor::from_draft(&PostDraft::new_post()));
        self.mode = Mode::Edit(EditTarget::PostEditor);
    }

    pub fn open_selected_post(&mut self) {
        let Some(post) = self.selected_post() else {
            return;
        };
        self.post_editor = Some(PostEditor::from_draft(&PostDraft::from_post(post)));
        self.mode = Mode::Edit(EditTarget::PostEditor);
    }

    /// Close the editor, discarding the draft
    pub fn cancel_post_editor(&mut self) {
        self.post_editor = None;
        self.mode = Mode::Navigate;
    }

    pub fn save_post_editor(&mut self) {
        let Some(draft) = self.post_editor.as_ref().map(PostEditor::to_draft) else {
            return;
        };
        match self.execute(Command::SavePost(draft)) {
            Ok(outcome) => {
                self.post_editor = None;
                self.mode = Mode::Navigate;
                if let Outcome::PostCreated { .. } = outcome {
                    self.post_cursor = 0;
                    self.post_scroll = 0;
                    self.set_status("post created");
                } else {
                    self.set_status("post saved");
                }
            }
            Err(CommandError::Rejected(reason)) => {
                if let Some(editor) = &mut self.post_editor {
                    editor.focus = match reason {
                        Rejection::Post(PostError::MissingContent) => PostField::Content,
                        Rejection::Post(PostError::MissingCategory) => PostField::Category,
                        _ => PostField::Title,
                    };
                }
                let message = reason.to_string();
                self.show_notice(
                    NoticeKind::Error,
                    &message,
                    Mode::Edit(EditTarget::PostEditor),
                );
            }
            Err(CommandError::Storage(e)) => {
                self.post_editor = None;
                self.mode = Mode::Navigate;
                self.set_storage_error(&e);
            }
        }
    }

    /// Ask before deleting the selected post
    pub fn request_delete_post(&mut self) {
        let Some(post) = self.selected_post() else {
            return;
        };
        self.confirm_state = Some(ConfirmState {
            message: format!("Delete \"{}\"?", post.title),
            action: ConfirmAction::DeletePost {
                id: post.id.clone(),
            },
        });
        self.mode = Mode::Confirm;
    }

    pub fn confirm_yes(&mut self) {
        let state = self.confirm_state.take();
        self.mode = Mode::Navigate;
        let Some(state) = state else {
            return;
        };
        match state.action {
            ConfirmAction::DeletePost { id } => {
                match self.execute(Command::DeletePost { id }) {
                    Ok(_) => self.set_status("post deleted"),
                    Err(CommandError::Storage(e)) => self.set_storage_error(&e),
                    Err(CommandError::Rejected(_)) => {}
                }
                self.clamp_cursors();
            }
        }
    }

    pub fn confirm_no(&mut self) {
        self.confirm_state = None;
        self.mode = Mode::Navigate;
    }

    // -- admin: settings ---------------------------------------------------

    pub fn begin_settings_edit(&mut self) {
        self.settings_edit_original = self.settings_form.focused().map(|f| f.value.clone());
        if let Some(field) = self.settings_form.focused_mut() {
            field.end();
        }
        self.mode = Mode::Edit(EditTarget::Settings);
    }

    /// Keep the edited value in the draft
    pub fn commit_settings_edit(&mut self) {
        self.settings_edit_original = None;
        self.mode = Mode::Navigate;
    }

    /// Restore the field to its value before editing began
    pub fn cancel_settings_edit(&mut self) {
        if let Some(original) = self.settings_edit_original.take()
            && let Some(field) = self.settings_form.focused_mut()
        {
            field.set(&original);
        }
        self.mode = Mode::Navigate;
    }

    /// Drop the draft and start over from the stored config
    pub fn reset_settings_draft(&mut self) {
        let focus = self.settings_form.focus;
        self.settings_form = Form::settings(self.store.config());
        self.settings_form.focus = focus;
        self.set_status("settings draft reset");
    }

    /// Save the whole settings draft
    pub fn save_settings(&mut self) {
        self.settings_edit_original = None;
        let config = self.settings_form.to_config();
        match self.execute(Command::SaveConfig(config)) {
            Ok(_) => {
                self.refresh_theme();
                self.show_notice(NoticeKind::Info, SETTINGS_SAVED, Mode::Navigate);
            }
            Err(CommandError::Storage(e)) => {
                self.refresh_theme();
                self.mode = Mode::Navigate;
                self.set_storage_error(&e);
            }
            Err(CommandError::Rejected(_)) => {}
        }
    }

    // -- external changes --------------------------------------------------

    /// Re-read every record and the settings from disk
    pub fn reload(&mut self) {
        self.reload_from_disk(&RecordKey::ALL, true);
    }

    /// Re-read only the records and settings stored at `paths`
    pub fn reload_paths(&mut self, paths: &[PathBuf]) {
        let keys: Vec<RecordKey> = RecordKey::ALL
            .into_iter()
            .filter(|key| paths.iter().any(|p| RecordKey::from_path(p) == Some(*key)))
            .collect();
        let settings = paths
            .iter()
            .any(|p| p.file_name().and_then(|n| n.to_str()) == Some("site.toml"));
        if keys.is_empty() && !settings {
            return;
        }
        self.reload_from_disk(&keys, settings);
    }

    fn reload_from_disk(&mut self, keys: &[RecordKey], settings: bool) {
        let before = self.store.records().clone();
        let issues = self.store.reload_records(keys);
        if let Some(site_dir) = &self.site_dir {
            site_io::log_load_issues(site_dir, &issues);
            if settings {
                match read_settings(site_dir) {
                    Ok(settings) => self.settings = settings,
                    Err(e) => tracing::warn!(error = %e, "keeping previous settings"),
                }
            }
        }
        self.refresh_theme();
        self.clamp_cursors();
        if self.store.records() != &before {
            tracing::info!("records reloaded from disk");
            self.set_status("reloaded from disk");
        }
    }
}

/// Run the TUI application
pub fn run(site_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match site_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let paths = SitePaths::new(discover_site(&start)?);
    let settings = read_settings(&paths.site_dir)?;
    if settings.log.file {
        logging::init_file_logging(&paths.log_file());
    }

    let store = Store::open_site(&paths, &settings);
    let mut app = App::new(store, settings);
    app.site_dir = Some(paths.site_dir.clone());

    let watcher = start_watcher(&paths.site_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_watcher(site_dir: &Path) -> Option<SiteWatcher> {
    match SiteWatcher::start(site_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable; external edits need a restart");
            None
        }
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&SiteWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if let Some(watcher) = watcher {
            let changed = changed_paths(watcher.poll());
            if !changed.is_empty() {
                app.reload_paths(&changed);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn changed_paths(events: Vec<FileEvent>) -> Vec<PathBuf> {
    events
        .into_iter()
        .flat_map(|FileEvent::Changed(paths)| paths)
        .collect()
}
