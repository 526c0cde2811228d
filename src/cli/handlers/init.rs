use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::settings_io::SETTINGS_TEMPLATE;
use crate::io::site_io;

/// Create `site/site.toml` under `root`. Returns an error if one already
/// exists and `force` is not set.
fn init_site(root: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let site_dir = root.join("site");
    let settings = site_dir.join("site.toml");

    if settings.exists() && !force {
        return Err("site already exists in ./site/ (use --force to overwrite site.toml)".into());
    }

    fs::create_dir_all(&site_dir)?;
    fs::write(&settings, SETTINGS_TEMPLATE)?;
    Ok(())
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;

    // Check for an enclosing site and warn
    if let Some(parent) = cwd.parent()
        && let Ok(parent_root) = site_io::discover_site(parent)
    {
        eprintln!("Note: parent site found at {}/site/", parent_root.display());
        eprintln!("Creating new site in ./site/");
    }

    init_site(&cwd, args.force)?;
    println!("Initialized site in {}", cwd.join("site").display());
    println!("Records are created with seed content on first save.");
    Ok(())
}
