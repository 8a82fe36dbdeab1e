//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Classification table converter: derive the hierarchy from coded tables
/// and emit IFC classification reference files
#[derive(Parser, Debug)]
#[command(name = "rsclass")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity, repeat for more detail (-d -d -d)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (replaces ./.rsclass.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Show author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a classification table to an IFC reference file
    Convert {
        /// Source table (two-column CSV: code, name; no header)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        /// Output file (default: <out_dir>/<input stem>.ifc)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Fail on any warning instead of writing output
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        scheme: SchemeArgs,
    },

    /// Print the classification hierarchy as a tree
    Tree {
        /// Source table
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Diagnose a table without writing output
    Check {
        /// Source table
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Scheme metadata overrides (highest precedence, above config and env).
#[derive(clap::Args, Debug, Default)]
pub struct SchemeArgs {
    /// Publishing organisation
    #[arg(long)]
    pub source: Option<String>,

    /// Edition identifier
    #[arg(long)]
    pub edition: Option<String>,

    /// Edition date (YYYY-MM-DD)
    #[arg(long)]
    pub edition_date: Option<String>,

    /// Scheme name
    #[arg(long)]
    pub name: Option<String>,

    /// Scheme description
    #[arg(long)]
    pub description: Option<String>,

    /// Reference token (repeatable)
    #[arg(long = "token")]
    pub tokens: Vec<String>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
