//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// agentsync - Sync MCP servers and rules from Claude Code to other AI agents
#[derive(Parser, Debug)]
#[command(name = "agentsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to agentsync.yaml (default: search upward from the current directory)
    #[arg(short, long, global = true, env = "AGENTSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show debug logging and every validation check
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Sync MCP servers and rules to all configured targets
    ///
    /// Examples:
    ///   agentsync sync                  # Sync everything
    ///   agentsync sync --dry-run        # Preview without writing
    ///   agentsync sync -t codex --mcp-only
    Sync {
        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Only sync MCP servers
        #[arg(long)]
        mcp_only: bool,

        /// Only sync rules
        #[arg(long, conflicts_with = "mcp_only")]
        rules_only: bool,

        /// Only sync this target
        #[arg(short, long)]
        target: Option<String>,

        /// Do not back up files before overwriting them
        #[arg(long)]
        no_backup: bool,
    },

    /// Check that targets match the Claude sources
    Validate {
        /// Only validate this target
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Write a default agentsync.yaml in the current directory
    Init {
        /// Overwrite an existing agentsync.yaml
        #[arg(long)]
        force: bool,
    },

    /// Show source files and per-target sync state
    Status,
}
