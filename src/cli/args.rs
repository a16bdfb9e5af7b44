//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Commando - A console host for declarative commands.
#[derive(Debug, Parser)]
#[command(name = "commando")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to manifest file (overrides default ./commando.yml)
    #[arg(short, long, global = true, env = "COMMANDO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hide status lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read commands from stdin (default if no command specified)
    Run(RunArgs),

    /// Run a single command line
    Exec(ExecArgs),

    /// List registered commands
    List(ListArgs),

    /// Validate the manifest
    Check(CheckArgs),

    /// Suggest completions for a partial command line
    Complete(CompleteArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Who runs the commands.
#[derive(Debug, Clone, Default, Args)]
pub struct IdentityArgs {
    /// Issuer name (overrides identity.name)
    #[arg(long = "as", value_name = "NAME")]
    pub name: Option<String>,

    /// Grant a permission node, in addition to identity.permissions
    #[arg(long = "grant", value_name = "PERM")]
    pub grants: Vec<String>,
}

/// Arguments for `run`.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,
}

/// Arguments for `exec`.
#[derive(Debug, Clone, Args)]
pub struct ExecArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Command line to run, e.g. `heal 50`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub line: Vec<String>,
}

/// Arguments for `complete`.
#[derive(Debug, Clone, Default, Args)]
pub struct CompleteArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Partial line; a trailing space starts a new word, e.g. `"heal "`
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub line: String,
}

/// Arguments for `list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `check`.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {}

/// Arguments for `completions`.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
