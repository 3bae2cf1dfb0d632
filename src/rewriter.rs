//! Call-site rewriting.
//!
//! Matches legacy API call expressions against the rule table and plans text
//! edits addressed by the byte offsets oxc captured during parsing. Edits are
//! sorted by position and applied in reverse order to preserve offset
//! validity, so everything outside an edited range survives byte-for-byte.

use crate::rules;
use crate::scope::{ScopeId, ScopeTree};
use crate::walk::{self, Visitor};
use oxc_ast::ast::{CallExpression, Expression, Program};
use oxc_span::{GetSpan, Span};

/// A single text replacement with position information.
///
/// `start == end` models a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Edit {
    fn replace(span: Span, text: String) -> Edit {
        Edit {
            start: span.start as usize,
            end: span.end as usize,
            text,
        }
    }

    pub(crate) fn insert(at: u32, text: String) -> Edit {
        Edit {
            start: at as usize,
            end: at as usize,
            text,
        }
    }

    fn delete(start: u32, end: u32) -> Edit {
        Edit {
            start: start as usize,
            end: end as usize,
            text: String::new(),
        }
    }
}

/// Applies edits to source content, returning the modified string.
///
/// Sorts edits by start offset (descending, longer ranges first on ties so a
/// replacement at an offset lands before an insertion at that same offset)
/// and applies each in turn. This ensures earlier edits don't invalidate
/// later offsets.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut result = source.to_string();
    for edit in edits {
        if edit.start <= result.len() && edit.end <= result.len() && edit.start <= edit.end {
            result.replace_range(edit.start..edit.end, &edit.text);
        }
    }

    result
}

/// Plans the rewrites for all bare-identifier legacy API calls.
///
/// A call is matched when its callee is a plain identifier naming a rule's
/// legacy API and that name is not bound by any scope between the call site
/// and the global scope. Per-rule argument policy:
///   - description not permitted: the callee is renamed and a leading string
///     literal argument is stripped;
///   - exactly one string-literal argument on a rule permitting descriptions:
///     the call becomes the target's `.skip` form with an empty callback
///     appended (a declared-but-unimplemented stub);
///   - otherwise the callee is renamed and the arguments are left alone.
/// Calls of any other shape are not an error; they pass through untouched.
pub fn plan_call_rewrites(program: &Program<'_>) -> Vec<Edit> {
    let mut rewriter = CallRewriter { edits: Vec::new() };
    walk::walk_program(program, &mut rewriter);
    rewriter.edits
}

struct CallRewriter {
    edits: Vec<Edit>,
}

impl Visitor for CallRewriter {
    fn visit_call(&mut self, call: &CallExpression<'_>, scope: ScopeId, scopes: &ScopeTree) {
        let Expression::Identifier(ident) = &call.callee else {
            return;
        };
        let Some(rule) = rules::lookup(ident.name.as_str()) else {
            return;
        };
        if scopes.is_locally_bound(ident.name.as_str(), scope) {
            // Deliberate no-op: a local binding shadows the legacy API.
            return;
        }

        let leading_string = match call.arguments.first().and_then(|arg| arg.as_expression()) {
            Some(Expression::StringLiteral(literal)) => Some(literal.span),
            _ => None,
        };

        if !rule.description_allowed {
            self.edits
                .push(Edit::replace(ident.span, rule.target.to_string()));
            if let Some(literal) = leading_string {
                let end = match call.arguments.get(1) {
                    Some(next) => next.span().start,
                    None => literal.end,
                };
                self.edits.push(Edit::delete(literal.start, end));
            }
        } else if let (Some(literal), 1, true) = (
            leading_string,
            call.arguments.len(),
            rule.supports_stub_synthesis(),
        ) {
            self.edits
                .push(Edit::replace(ident.span, format!("{}.skip", rule.target)));
            self.edits
                .push(Edit::insert(literal.end, ", () => {}".to_string()));
        } else {
            self.edits
                .push(Edit::replace(ident.span, rule.target.to_string()));
        }
    }
}

/// Plans the rewrites for `legacy.modifier(...)` member calls.
///
/// Only the receiver identifier is replaced; the modifier and every argument
/// are preserved verbatim. The shadowing check of the bare-call path is not
/// re-applied here. Also renames `jest.setTimeout(...)` to the runner's
/// `test.setTimeout(...)`, since migrated suites frequently carry that call.
pub fn plan_modifier_rewrites(program: &Program<'_>) -> Vec<Edit> {
    let mut rewriter = ModifierRewriter { edits: Vec::new() };
    walk::walk_program(program, &mut rewriter);
    rewriter.edits
}

struct ModifierRewriter {
    edits: Vec<Edit>,
}

impl Visitor for ModifierRewriter {
    fn visit_call(&mut self, call: &CallExpression<'_>, _scope: ScopeId, _scopes: &ScopeTree) {
        let Some(member) = call.callee.as_member_expression() else {
            return;
        };
        let Expression::Identifier(object) = member.object() else {
            return;
        };
        let Some(property) = member.static_property_name() else {
            return;
        };

        if object.name.as_str() == "jest" && property == "setTimeout" {
            self.edits.push(Edit::replace(object.span, "test".to_string()));
            return;
        }

        let Some(rule) = rules::lookup(object.name.as_str()) else {
            return;
        };
        if !rule.allows_modifier(property) {
            return;
        }

        self.edits
            .push(Edit::replace(object.span, rule.target.to_string()));
    }
}
