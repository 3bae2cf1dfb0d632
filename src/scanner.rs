//! Test file scanner.
//!
//! Resolves the user's path arguments into the set of files to migrate.
//! Shell-style glob patterns are expanded, explicit file paths are taken
//! as-is, and directories are walked recursively for test files, skipping
//! entries whose names start with `.` or `_` and `node_modules` trees.
//! Also hosts the clean-working-tree check guarding in-place rewrites.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Expands glob patterns among the raw path arguments.
///
/// Arguments without glob metacharacters pass through unchanged, so plain
/// files and directories don't have to exist as patterns.
pub fn expand_paths(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.contains(['*', '?', '[']) {
            let matches = glob::glob(input)
                .with_context(|| format!("Invalid glob pattern '{}'", input))?;
            for entry in matches {
                paths.push(entry.with_context(|| format!("Failed to expand '{}'", input))?);
            }
        } else {
            paths.push(PathBuf::from(input));
        }
    }

    Ok(paths)
}

/// Collects the test files to migrate from files, directories and expanded
/// glob matches.
///
/// Explicitly named files are included as-is; directories are walked for
/// `*.test.*` / `*.spec.*` sources so pointing the tool at a project root
/// doesn't sweep up production code.
pub fn collect_test_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| !is_excluded(e))
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_test_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

fn is_excluded(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.') || s.starts_with('_') || s == "node_modules")
}

/// Whether a path names a test source file (`foo.test.ts`, `bar.spec.js`, …).
pub fn is_test_file(path: &Path) -> bool {
    let has_source_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));

    has_source_extension
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.contains(".test.") || name.contains(".spec."))
}

/// Whether the git working tree containing `dir` has no pending changes.
///
/// Outside a git repository there is nothing to guard, so the check passes.
pub fn git_tree_is_clean(dir: &Path) -> Result<bool> {
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(dir)
        .output()
        .context("Failed to run git status")?;

    if !output.status.success() {
        return Ok(true);
    }

    Ok(output.stdout.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_test_files() {
        assert!(is_test_file(Path::new("basic_smoke.ui.test.ts")));
        assert!(is_test_file(Path::new("suite.spec.js")));
        assert!(is_test_file(Path::new("nested/dir/app.test.tsx")));
    }

    #[test]
    fn rejects_non_test_sources_and_other_extensions() {
        assert!(!is_test_file(Path::new("app.ts")));
        assert!(!is_test_file(Path::new("helpers.js")));
        assert!(!is_test_file(Path::new("notes.test.md")));
        assert!(!is_test_file(Path::new("test")));
    }

    #[test]
    fn plain_arguments_pass_through_unexpanded() {
        let paths = expand_paths(&["src".to_string(), "a.test.ts".to_string()]).unwrap();
        assert_eq!(
            paths,
            vec![PathBuf::from("src"), PathBuf::from("a.test.ts")]
        );
    }

    #[test]
    fn collects_test_files_from_a_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("suites")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::write(root.join("suites/login.test.ts"), "it('x')").unwrap();
        std::fs::write(root.join("suites/util.ts"), "export {}").unwrap();
        std::fs::write(root.join("node_modules/pkg/x.test.js"), "it('y')").unwrap();

        let mut files = collect_test_files(&[root.to_path_buf()]).unwrap();
        files.sort();
        assert_eq!(files, vec![root.join("suites/login.test.ts")]);
    }

    #[test]
    fn explicit_files_are_taken_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-test.ts");
        std::fs::write(&file, "describe('x', f)").unwrap();

        let files = collect_test_files(&[file.clone()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn glob_patterns_expand_to_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.test.ts"), "").unwrap();
        std::fs::write(dir.path().join("b.test.ts"), "").unwrap();

        let pattern = format!("{}/*.test.ts", dir.path().display());
        let mut paths = expand_paths(&[pattern]).unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec![dir.path().join("a.test.ts"), dir.path().join("b.test.ts")]
        );
    }
}
