//! The per-file transform pipeline.
//!
//! Five sequential stages: Parse, InjectImport, RewriteCalls,
//! RewriteModifiers, Print. The parsed tree is owned by the pipeline for the
//! duration of one file's transform; each stage appends to a shared edit set
//! and Print applies it to the original text in one pass. A parse failure
//! aborts that file only; a stage finding nothing to do is a normal outcome.

use crate::format::FormatProfile;
use crate::{imports, rewriter};
use anyhow::{Context, Result};
use colored::Colorize;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result of transforming a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// File the transform ran against.
    pub path: PathBuf,
    /// Whether the rewritten text differs from the input.
    pub changed: bool,
}

/// A file that could not be transformed.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of a batch migration run.
#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_unchanged: usize,
    pub failures: Vec<FileFailure>,
}

/// Rewrites one file's source text, returning the migrated text.
///
/// `path` is used for source-type selection and diagnostics only; the
/// transform itself is purely text-in, text-out, so callers choose whether
/// the result is persisted.
pub fn transform_source(source: &str, path: &Path) -> Result<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts());

    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked {
        anyhow::bail!("Failed to parse {}: {:?}", path.display(), ret.errors);
    }
    if !ret.errors.is_empty() {
        // Recoverable syntax issues; the tree is still usable.
        eprintln!(
            "{} Parse errors in {}: {:?}",
            "warn:".yellow().bold(),
            path.display(),
            ret.errors
        );
    }
    let program = ret.program;

    let profile = FormatProfile::detect(&program, source);

    let mut edits = Vec::new();
    edits.extend(imports::plan_import(&program, &profile));
    edits.extend(rewriter::plan_call_rewrites(&program));
    edits.extend(rewriter::plan_modifier_rewrites(&program));

    Ok(rewriter::apply_edits(source, edits))
}

/// Reads, transforms and (optionally) writes back a single file.
///
/// With `write` unset this is the dry-run path: the file is left untouched
/// and only the outcome is reported. The file handle is released on every
/// exit path, including parse failure.
pub fn transform_file(path: &Path, write: bool) -> Result<FileOutcome> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let output = transform_source(&source, path)?;
    let changed = output != source;

    if write && changed {
        std::fs::write(path, &output)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        changed,
    })
}
