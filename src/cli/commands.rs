use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sc", about = concat!("showcase v", env!("CARGO_PKG_VERSION"), " - a landing site and its back office"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different site directory
    #[arg(short = 'C', long = "site-dir", global = true)]
    pub site_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create site/ with a default site.toml in the current directory
    Init(InitArgs),
    /// Show the site config, or set one field
    Config(ConfigCmd),
    /// List posts in feed order
    Posts(PostsArgs),
    /// Show, add, edit or delete a post
    Post(PostCmd),
    /// List inquiries, newest first
    Inquiries(InquiriesArgs),
    /// Submit an inquiry the way the public form does
    Inquire(InquireArgs),
    /// Complete or delete an inquiry
    Inquiry(InquiryCmd),
    /// Search posts and inquiries by regex (case-insensitive)
    Search(SearchArgs),
    /// View or prune the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing site/site.toml
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set one field and save the whole config
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Field name (siteName, site_name, primary-color, ...)
    pub field: String,
    /// New value
    pub value: String,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct PostsArgs {
    /// Only posts in this category (event, notice, guide)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct PostCmd {
    #[command(subcommand)]
    pub action: PostAction,
}

#[derive(Subcommand)]
pub enum PostAction {
    /// Show one post
    Show(PostIdArgs),
    /// Create a post at the top of the feed
    Add(PostAddArgs),
    /// Change fields of an existing post
    Edit(PostEditArgs),
    /// Delete a post
    Rm(PostRmArgs),
}

#[derive(Args)]
pub struct PostIdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct PostAddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    /// event, notice or guide (default: event)
    #[arg(long)]
    pub category: Option<String>,
    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct PostEditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Image URL (pass "" to remove)
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct PostRmArgs {
    pub id: String,
    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Inquiries
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InquiriesArgs {
    /// Only inquiries with this status (pending, completed)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct InquireArgs {
    pub name: String,
    pub contact: String,
    /// Optional message
    pub message: Option<String>,
}

#[derive(Args)]
pub struct InquiryCmd {
    #[command(subcommand)]
    pub action: InquiryActionCmd,
}

#[derive(Subcommand)]
pub enum InquiryActionCmd {
    /// Mark an inquiry completed
    Done(InquiryIdArgs),
    /// Delete an inquiry
    Rm(InquiryIdArgs),
}

#[derive(Args)]
pub struct InquiryIdArgs {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
