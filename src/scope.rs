//! Lexical scope tracking and binding resolution.
//!
//! Scopes form an acyclic parent-pointer chain rooted at the global scope.
//! Each scope owns the set of names it directly binds; resolution walks the
//! chain iteratively from the call site toward the root. A legacy API call is
//! only eligible for rewriting when no scope on that chain binds its name, so
//! a file defining its own `it` or `beforeEach` never has those calls touched.

use oxc_ast::ast::{BindingPattern, BindingPatternKind};
use std::collections::HashSet;

/// Index of a scope within a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    names: HashSet<String>,
}

/// Arena of scopes built while walking a file's syntax tree.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Creates a tree containing only the global scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope {
                parent: None,
                names: HashSet::new(),
            }],
        }
    }

    /// The global root scope.
    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Opens a child scope under `parent`.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            parent: Some(parent),
            names: HashSet::new(),
        });
        id
    }

    /// Records `name` as directly bound in `scope`.
    pub fn bind(&mut self, scope: ScopeId, name: &str) {
        self.scopes[scope.0].names.insert(name.to_string());
    }

    /// Records every name bound by a binding pattern in `scope`.
    ///
    /// Covers plain identifiers, object and array destructuring (including
    /// rest elements) and default-value assignment patterns.
    pub fn bind_pattern(&mut self, scope: ScopeId, pattern: &BindingPattern<'_>) {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => {
                self.bind(scope, ident.name.as_str());
            }
            BindingPatternKind::ObjectPattern(object) => {
                for property in &object.properties {
                    self.bind_pattern(scope, &property.value);
                }
                if let Some(rest) = &object.rest {
                    self.bind_pattern(scope, &rest.argument);
                }
            }
            BindingPatternKind::ArrayPattern(array) => {
                for element in array.elements.iter().flatten() {
                    self.bind_pattern(scope, element);
                }
                if let Some(rest) = &array.rest {
                    self.bind_pattern(scope, &rest.argument);
                }
            }
            BindingPatternKind::AssignmentPattern(assignment) => {
                self.bind_pattern(scope, &assignment.left);
            }
        }
    }

    /// Whether `name` is bound in `scope` or any enclosing scope.
    ///
    /// Walks parent pointers iteratively; the chain is acyclic by
    /// construction and terminates at the global root.
    pub fn is_locally_bound(&self, name: &str, scope: ScopeId) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if scope.names.contains(name) {
                return true;
            }
            current = scope.parent;
        }
        false
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
