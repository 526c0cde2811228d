use clap::Parser;
use showcase::cli::commands::{Cli, Commands};
use showcase::cli::handlers;
use showcase::util::logging;

fn main() {
    let cli = Cli::parse();
    let site_dir = cli.site_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = showcase::tui::run(site_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before site discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_stderr_logging();
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
