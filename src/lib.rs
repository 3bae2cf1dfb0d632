//! pw-codemod library for migrating Mocha-style test files to Playwright Test.
//!
//! This library provides programmatic access to the migration pipeline. Each
//! file is transformed independently through five sequential stages:
//!
//! 1. **Parse**: turn the source text into a syntax tree (oxc)
//! 2. **InjectImport**: plan the `@playwright/test` import, with `expect`
//!    included when the file uses the bare assertion call
//! 3. **RewriteCalls**: rename legacy `describe`/`it`/hook calls that are not
//!    shadowed by local bindings, stripping hook descriptions and
//!    synthesizing `.skip` stubs for pending tests
//! 4. **RewriteModifiers**: rename the receiver of `describe.only`-style
//!    calls, leaving modifier and arguments untouched
//! 5. **Print**: apply the accumulated edits to the original text, so
//!    everything outside an edit keeps its bytes, and synthesized text
//!    follows the file's detected quote style and line terminator
//!
//! # Example
//!
//! ```no_run
//! use pw_codemod::transform;
//! use std::path::Path;
//!
//! let source = "describe('suite', () => { it('t', () => {}) })";
//! let migrated = transform::transform_source(source, Path::new("suite.test.ts")).unwrap();
//! assert!(migrated.starts_with("import { test } from '@playwright/test';"));
//! ```

pub mod cli;
pub mod format;
pub mod imports;
pub mod rewriter;
pub mod rules;
pub mod scanner;
pub mod scope;
pub mod transform;
pub mod walk;

// Re-export commonly used types at crate root
pub use rules::{RULES, RewriteRule};
pub use transform::{FileOutcome, MigrationReport, transform_file, transform_source};
