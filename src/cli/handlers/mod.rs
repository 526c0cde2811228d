mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Global override for the site directory (set by -C flag)
static SITE_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recovery;
use crate::io::settings_io::read_settings;
use crate::io::site_io::{self, SiteError};
use crate::model::{InquiryStatus, PostDraft, SitePaths};
use crate::ops::command::{Command, Outcome};
use crate::ops::post_ops::posts_in_category;
use crate::ops::search::{build_search_regex, search_records};
use crate::store::Store;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Default number of recovery entries shown
const RECOVERY_LIMIT: usize = 10;
/// Default age cutoff for `sc recovery prune`
const PRUNE_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    // Store -C override for load_site()
    if let Some(ref dir) = cli.site_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        if let Ok(mut slot) = SITE_DIR_OVERRIDE.lock() {
            slot.replace(abs);
        }
    }

    match cli.command {
        None => Err("no subcommand given (run `sc` without arguments for the terminal UI)".into()),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before site discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::Config(ConfigCmd { action: None }) => cmd_config_show(json),
            Commands::Posts(args) => cmd_posts(args, json),
            Commands::Inquiries(args) => cmd_inquiries(args, json),
            Commands::Search(args) => cmd_search(args, json),
            Commands::Recovery(args) => cmd_recovery(args, json),

            // Write commands
            Commands::Config(ConfigCmd {
                action: Some(ConfigAction::Set(args)),
            }) => cmd_config_set(args, json),
            Commands::Post(PostCmd { action }) => match action {
                PostAction::Show(args) => cmd_post_show(args, json),
                PostAction::Add(args) => cmd_post_add(args, json),
                PostAction::Edit(args) => cmd_post_edit(args, json),
                PostAction::Rm(args) => cmd_post_rm(args, json),
            },
            Commands::Inquire(args) => cmd_inquire(args, json),
            Commands::Inquiry(InquiryCmd { action }) => match action {
                InquiryActionCmd::Done(args) => cmd_inquiry_done(args, json),
                InquiryActionCmd::Rm(args) => cmd_inquiry_rm(args, json),
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn start_dir() -> Result<PathBuf, SiteError> {
    let override_dir = SITE_DIR_OVERRIDE
        .lock()
        .ok()
        .and_then(|slot| slot.clone());
    match override_dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().map_err(SiteError::IoError),
    }
}

fn site_paths() -> Result<SitePaths, SiteError> {
    let start = start_dir()?;
    Ok(SitePaths::new(site_io::discover_site(&start)?))
}

fn load_site() -> Result<(SitePaths, Store), Box<dyn std::error::Error>> {
    let paths = site_paths()?;
    let settings = read_settings(&paths.site_dir)?;
    let store = Store::open_site(&paths, &settings);
    Ok((paths, store))
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Report a write. Text mode prints `message`; JSON mode prints the outcome.
fn report(outcome: &Outcome, json: bool, message: &str) -> CmdResult {
    if json {
        print_json(&outcome_to_json(outcome))
    } else {
        println!("{}", message);
        Ok(())
    }
}

/// Parse a prune cutoff: RFC 3339 timestamp or a plain `YYYY-MM-DD` date
/// (midnight UTC).
fn parse_cutoff(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{}' (expected YYYY-MM-DD or RFC 3339)", s))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_config_show(json: bool) -> CmdResult {
    let (_, store) = load_site()?;
    if json {
        return print_json(store.config());
    }
    for line in format_config(store.config()) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_posts(args: PostsArgs, json: bool) -> CmdResult {
    let (_, store) = load_site()?;
    let category = args
        .category
        .as_deref()
        .map(parse_category)
        .transpose()
        .map_err(Box::<dyn std::error::Error>::from)?;
    let posts = match category {
        Some(c) => posts_in_category(store.posts(), c),
        None => store.posts().iter().collect(),
    };

    if json {
        return print_json(&posts);
    }
    for post in posts {
        println!("{}", format_post_line(post));
    }
    Ok(())
}

fn cmd_post_show(args: PostIdArgs, json: bool) -> CmdResult {
    let (_, store) = load_site()?;
    let post = store
        .records()
        .find_post(&args.id)
        .ok_or_else(|| format!("post not found: {}", args.id))?;
    if json {
        return print_json(post);
    }
    for line in format_post_detail(post) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_inquiries(args: InquiriesArgs, json: bool) -> CmdResult {
    let (_, store) = load_site()?;
    let status = args
        .status
        .as_deref()
        .map(parse_status)
        .transpose()
        .map_err(Box::<dyn std::error::Error>::from)?;
    let inquiries: Vec<_> = store
        .inquiries()
        .iter()
        .filter(|i| status.is_none_or(|s| i.status == s))
        .collect();

    if json {
        return print_json(&inquiries);
    }
    for inquiry in inquiries {
        for line in format_inquiry(inquiry) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> CmdResult {
    let (_, store) = load_site()?;
    let re = build_search_regex(&args.pattern)
        .ok_or_else(|| format!("invalid search pattern '{}'", args.pattern))?;
    let records = store.records();
    let hits = search_records(records, &re);

    if json {
        let out: Vec<SearchHitJson> = hits.iter().map(|h| hit_to_json(h, records)).collect();
        return print_json(&out);
    }
    for hit in &hits {
        println!("{}", format_search_hit(hit, records));
    }
    Ok(())
}

fn cmd_recovery(args: RecoveryCmd, json: bool) -> CmdResult {
    let paths = site_paths()?;
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(&paths.site_dir).display());
            Ok(())
        }
        Some(RecoveryAction::Prune(prune)) => {
            let cutoff = if prune.all {
                None
            } else {
                match prune.before.as_deref() {
                    Some(s) => Some(parse_cutoff(s)?),
                    None => Some(Utc::now() - Duration::days(PRUNE_DAYS)),
                }
            };
            let removed = recovery::prune_recovery(&paths.site_dir, cutoff)?;
            if json {
                print_json(&serde_json::json!({ "removed": removed }))
            } else {
                println!("removed {} recovery entries", removed);
                Ok(())
            }
        }
        None => {
            let limit = args.limit.unwrap_or(RECOVERY_LIMIT);
            let entries = recovery::read_recovery_entries(&paths.site_dir, Some(limit));
            if json {
                let out: Vec<RecoveryEntryJson> = entries.iter().map(recovery_to_json).collect();
                return print_json(&out);
            }
            if entries.is_empty() {
                println!("recovery log is empty");
            }
            for entry in &entries {
                for line in format_recovery_entry(entry) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_config_set(args: ConfigSetArgs, json: bool) -> CmdResult {
    let field = parse_config_field(&args.field)?;
    let (_, mut store) = load_site()?;
    let mut config = store.config().clone();
    config.set(field, args.value);
    let outcome = store.execute(Command::SaveConfig(config))?;
    report(&outcome, json, &format!("{} updated", field.key()))
}

fn cmd_post_add(args: PostAddArgs, json: bool) -> CmdResult {
    let mut draft = PostDraft::new_post();
    if let Some(ref c) = args.category {
        draft.category = Some(parse_category(c)?);
    }
    draft.title = args.title;
    draft.content = args.content;
    draft.image_url = args.image.unwrap_or_default();

    let (_, mut store) = load_site()?;
    let outcome = store.execute(Command::SavePost(draft))?;
    let id = match &outcome {
        Outcome::PostCreated { id } | Outcome::PostUpdated { id } => id.clone(),
        _ => String::new(),
    };
    report(&outcome, json, &id)
}

fn cmd_post_edit(args: PostEditArgs, json: bool) -> CmdResult {
    let (_, mut store) = load_site()?;
    let post = store
        .records()
        .find_post(&args.id)
        .ok_or_else(|| format!("post not found: {}", args.id))?;

    let mut draft = PostDraft::from_post(post);
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(content) = args.content {
        draft.content = content;
    }
    if let Some(ref c) = args.category {
        draft.category = Some(parse_category(c)?);
    }
    if let Some(image) = args.image {
        draft.image_url = image;
    }

    let outcome = store.execute(Command::SavePost(draft))?;
    report(&outcome, json, &format!("post {} saved", args.id))
}

fn cmd_post_rm(args: PostRmArgs, json: bool) -> CmdResult {
    let (_, mut store) = load_site()?;
    let post = store
        .records()
        .find_post(&args.id)
        .ok_or_else(|| format!("post not found: {}", args.id))?;
    if !args.yes {
        return Err(format!(
            "refusing to delete post {} (\"{}\") without --yes",
            post.id, post.title
        )
        .into());
    }
    let outcome = store.execute(Command::DeletePost { id: args.id.clone() })?;
    report(&outcome, json, &format!("post {} deleted", args.id))
}

fn cmd_inquire(args: InquireArgs, json: bool) -> CmdResult {
    let (_, mut store) = load_site()?;
    let outcome = store.execute(Command::SubmitInquiry {
        name: args.name,
        contact: args.contact,
        message: args.message.unwrap_or_default(),
    })?;
    let id = match &outcome {
        Outcome::InquirySubmitted { id } => id.clone(),
        _ => String::new(),
    };
    report(&outcome, json, &id)
}

fn cmd_inquiry_done(args: InquiryIdArgs, json: bool) -> CmdResult {
    let (_, mut store) = load_site()?;
    let inquiry = store
        .records()
        .find_inquiry(&args.id)
        .ok_or_else(|| format!("inquiry not found: {}", args.id))?;
    let already = inquiry.status == InquiryStatus::Completed;
    let outcome = store.execute(Command::CompleteInquiry { id: args.id.clone() })?;
    let message = if already {
        format!("inquiry {} already completed", args.id)
    } else {
        format!("inquiry {} completed", args.id)
    };
    report(&outcome, json, &message)
}

fn cmd_inquiry_rm(args: InquiryIdArgs, json: bool) -> CmdResult {
    let (_, mut store) = load_site()?;
    if store.records().find_inquiry(&args.id).is_none() {
        return Err(format!("inquiry not found: {}", args.id).into());
    }
    let outcome = store.execute(Command::DeleteInquiry { id: args.id.clone() })?;
    report(&outcome, json, &format!("inquiry {} deleted", args.id))
}
