//! Runner import injection.
//!
//! Every migrated file needs `test` in scope, and files that assert through
//! the bare `expect(...)` call need `expect` from the same module. Usage is
//! detected on the pre-rewrite tree (the rewrite rules neither add nor remove
//! assertion calls) and the chosen import is inserted ahead of the first
//! top-level statement, rendered with the file's own format profile.
//!
//! Files that already import from the runner module are left alone, so
//! re-running the migration never stacks duplicate imports.

use crate::format::FormatProfile;
use crate::rewriter::Edit;
use crate::scope::{ScopeId, ScopeTree};
use crate::walk::{self, Visitor};
use oxc_ast::ast::{CallExpression, Expression, ImportDeclaration, Program};
use oxc_span::GetSpan;

/// Module the target runner's entry points are imported from.
pub const RUNNER_MODULE: &str = "@playwright/test";

/// Bare identifier whose calls mark a file as using the assertion API.
const ASSERTION_NAME: &str = "expect";

#[derive(Default)]
struct ImportScan {
    uses_assertion: bool,
    has_runner_import: bool,
}

impl Visitor for ImportScan {
    fn visit_call(&mut self, call: &CallExpression<'_>, _scope: ScopeId, _scopes: &ScopeTree) {
        if let Expression::Identifier(ident) = &call.callee {
            if ident.name.as_str() == ASSERTION_NAME {
                self.uses_assertion = true;
            }
        }
    }

    fn visit_import(&mut self, import: &ImportDeclaration<'_>) {
        if import.source.value.as_str() == RUNNER_MODULE {
            self.has_runner_import = true;
        }
    }
}

/// Plans the runner import insertion for one file, or `None` when the file
/// has no top-level statements or already imports from the runner module.
pub fn plan_import(program: &Program<'_>, profile: &FormatProfile) -> Option<Edit> {
    let first = program.body.first()?;

    let mut scan = ImportScan::default();
    walk::walk_program(program, &mut scan);
    if scan.has_runner_import {
        return None;
    }

    let quote = profile.quote.char();
    let names = if scan.uses_assertion {
        "test, expect"
    } else {
        "test"
    };
    let text = format!(
        "import {{ {names} }} from {quote}{RUNNER_MODULE}{quote};{}",
        profile.newline.as_str()
    );
    Some(Edit::insert(first.span().start, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::apply_edits;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn inject(source: &str) -> String {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        assert!(!ret.panicked, "fixture failed to parse");
        let profile = FormatProfile::detect(&ret.program, source);
        let edits = plan_import(&ret.program, &profile).into_iter().collect();
        apply_edits(source, edits)
    }

    #[test]
    fn imports_runner_only_without_assertions() {
        assert_eq!(
            inject("it('t', () => { run() })"),
            "import { test } from '@playwright/test';\nit('t', () => { run() })"
        );
    }

    #[test]
    fn imports_assertion_function_when_expect_is_called() {
        assert_eq!(
            inject("it('t', () => { expect(1).toBe(1) })"),
            "import { test, expect } from '@playwright/test';\nit('t', () => { expect(1).toBe(1) })"
        );
    }

    #[test]
    fn member_style_assertions_do_not_count() {
        // Only the bare identifier call marks assertion usage.
        assert_eq!(
            inject("it('t', () => { assert.expect(1) })"),
            "import { test } from '@playwright/test';\nit('t', () => { assert.expect(1) })"
        );
    }

    #[test]
    fn inserts_ahead_of_the_first_statement() {
        assert_eq!(
            inject("// header comment\nit('t', fn)"),
            "// header comment\nimport { test } from '@playwright/test';\nit('t', fn)"
        );
    }

    #[test]
    fn lands_before_existing_unrelated_imports() {
        assert_eq!(
            inject("import { helper } from './helper';\nit('t', fn)"),
            "import { test } from '@playwright/test';\nimport { helper } from './helper';\nit('t', fn)"
        );
    }

    #[test]
    fn existing_runner_import_suppresses_injection() {
        let source = "import { test, expect } from '@playwright/test';\ntest('t', fn)";
        assert_eq!(inject(source), source);
    }

    #[test]
    fn empty_file_gets_no_import() {
        assert_eq!(inject(""), "");
        assert_eq!(inject("// nothing here\n"), "// nothing here\n");
    }

    #[test]
    fn renders_with_detected_quotes_and_terminator() {
        assert_eq!(
            inject("it(\"t\", () => {})\r\nit(\"u\", () => {})\r\n"),
            "import { test } from \"@playwright/test\";\r\nit(\"t\", () => {})\r\nit(\"u\", () => {})\r\n"
        );
    }
}
