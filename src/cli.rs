//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! `migrate` rewrites test files in place (or previews with `--dry`);
//! `scan` lists the files a migration would touch without processing them.

use clap::{Parser, Subcommand};

/// Migrate Mocha-style test files to Playwright Test.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite test files to the Playwright Test API.
    Migrate {
        /// Files, directories or glob patterns to migrate.
        /// Prompts interactively when omitted.
        paths: Vec<String>,

        /// Dry run: report which files would change without writing anything.
        #[arg(short, long)]
        dry: bool,

        /// Bypass the clean-git-tree safety check.
        #[arg(short, long)]
        force: bool,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,

        /// Print per-file diagnostics to stderr.
        #[arg(short, long)]
        verbose: bool,
    },

    /// List files that would be migrated without processing them.
    Scan {
        /// Files, directories or glob patterns to inspect.
        paths: Vec<String>,
    },
}
