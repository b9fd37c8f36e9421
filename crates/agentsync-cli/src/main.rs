//! agentsync CLI
//!
//! Keeps Cursor, Codex and Antigravity in step with Claude Code's MCP servers
//! and `CLAUDE.md` rules.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Ui;
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings by default, debug with `--verbose`.
fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Verbose mode enabled");
}

fn run(cli: Cli) -> Result<()> {
    let ui = Ui::new(cli.quiet, cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Sync {
            dry_run,
            mcp_only,
            rules_only,
            target,
            no_backup,
        } => commands::run_sync(
            config,
            commands::SyncArgs {
                dry_run,
                mcp_only,
                rules_only,
                target,
                backup: !no_backup,
            },
            &ui,
        ),
        Commands::Validate { target } => commands::run_validate(config, target.as_deref(), &ui),
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            commands::run_init(&cwd, force, &ui)
        }
        Commands::Status => commands::run_status(config, &ui),
    }
}
