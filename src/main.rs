//! pw-codemod: migrate Mocha-style test files to Playwright Test.
//!
//! Resolves the requested paths to a set of test files, runs the per-file
//! transform pipeline over each, and either writes the results in place or
//! reports what would change. Failures are file-scoped: a file that cannot
//! be parsed is reported and left unmodified while its siblings proceed.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use pw_codemod::cli::{Args, Commands};
use pw_codemod::scanner;
use pw_codemod::transform::{self, FileFailure, MigrationReport};
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Migrate {
            paths,
            dry,
            force,
            json,
            verbose,
        } => cmd_migrate(paths, dry, force, json, verbose),
        Commands::Scan { paths } => cmd_scan(paths),
    }
}

fn cmd_migrate(
    paths: Vec<String>,
    dry: bool,
    force: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let inputs = resolve_inputs(paths)?;
    let scan_paths = scanner::expand_paths(&inputs)?;
    let files = scanner::collect_test_files(&scan_paths)?;

    if files.is_empty() {
        println!(
            "{} No files found matching {}",
            "info:".blue().bold(),
            inputs.join(" ")
        );
        return Ok(());
    }
    if verbose {
        eprintln!(
            "{} Found {} test file(s) to migrate",
            "info:".blue().bold(),
            files.len()
        );
    }

    if !dry && !force && !scanner::git_tree_is_clean(Path::new("."))? {
        anyhow::bail!(
            "Git working tree has uncommitted changes; commit or stash them, or re-run with --force"
        );
    }

    let mut report = MigrationReport {
        files_scanned: files.len(),
        ..Default::default()
    };

    for file in &files {
        match transform::transform_file(file, !dry) {
            Ok(outcome) if outcome.changed => {
                report.files_changed += 1;
                println!(
                    "{} {}",
                    if dry { "Would update:" } else { "Updated:" }.yellow().bold(),
                    file.display()
                );
            }
            Ok(_) => {
                report.files_unchanged += 1;
                if verbose {
                    eprintln!("{} {} unchanged", "info:".blue().bold(), file.display());
                }
            }
            Err(error) => {
                eprintln!("{} {:#}", "error:".red().bold(), error);
                report.failures.push(FileFailure {
                    path: file.clone(),
                    error: format!("{:#}", error),
                });
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\n{} {} of {} file(s) {}",
        "ok:".green().bold(),
        report.files_changed,
        report.files_scanned,
        if dry { "would change" } else { "changed" }
    );
    if !report.failures.is_empty() {
        println!(
            "{} {} file(s) could not be transformed",
            "warn:".yellow().bold(),
            report.failures.len()
        );
    }
    if dry && report.files_changed > 0 {
        println!(
            "{} Re-run without --dry to write the changes",
            "hint:".cyan().bold()
        );
    }

    Ok(())
}

fn cmd_scan(paths: Vec<String>) -> Result<()> {
    let inputs = if paths.is_empty() {
        vec![".".to_string()]
    } else {
        paths
    };
    let scan_paths = scanner::expand_paths(&inputs)?;
    let files = scanner::collect_test_files(&scan_paths)?;

    println!("Would migrate {} file(s):", files.len());
    for file in files {
        println!("  {}", file.display());
    }

    Ok(())
}

/// Uses the given paths, or prompts for them when none were supplied.
fn resolve_inputs(paths: Vec<String>) -> Result<Vec<String>> {
    if !paths.is_empty() {
        return Ok(paths);
    }

    let answer: String = dialoguer::Input::new()
        .with_prompt("On which files or directory should the migration run?")
        .default(".".to_string())
        .interact_text()?;

    Ok(answer.split_whitespace().map(str::to_string).collect())
}
