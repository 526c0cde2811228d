use std::fs::OpenOptions;
use std::path::Path;

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    let default_level = "warn";
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// CLI commands log to stderr so stdout stays clean for `--json`.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// The terminal UI owns the screen, so events go to an append-only file.
/// Returns false if the file could not be opened; logging stays off then.
pub fn init_file_logging(path: &Path) -> bool {
    let out_file = match OpenOptions::new().append(true).create(true).open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(out_file)
        .try_init()
        .is_ok()
}
