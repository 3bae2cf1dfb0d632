//! Syntax tree traversal.
//!
//! A single preorder walk serves every component that queries the tree: call
//! expressions (delivered with the lexical scope of their call site), string
//! literals, and import declarations. The walker opens a scope for each
//! function body, block, loop and catch clause it descends into, registering
//! that scope's declarations before visiting its statements so that a name
//! bound anywhere in a scope shadows the legacy API throughout it.

use crate::scope::{ScopeId, ScopeTree};
use oxc_ast::ast::{
    ArrayExpressionElement, CallExpression, ChainElement, Declaration, Expression,
    ForStatementInit, ForStatementLeft, Function, ImportDeclaration, ImportDeclarationSpecifier,
    MemberExpression, ObjectPropertyKind, Program, Statement, StringLiteral,
};

/// Callbacks invoked during a tree walk. All methods default to no-ops so a
/// component only implements the patterns it queries for.
pub trait Visitor {
    /// Called for every call expression, with the scope of its call site.
    fn visit_call(&mut self, _call: &CallExpression<'_>, _scope: ScopeId, _scopes: &ScopeTree) {}

    /// Called for every string literal.
    fn visit_string_literal(&mut self, _literal: &StringLiteral<'_>) {}

    /// Called for every import declaration.
    fn visit_import(&mut self, _import: &ImportDeclaration<'_>) {}
}

/// Walks a parsed program, building the scope chain as it descends.
pub fn walk_program(program: &Program<'_>, visitor: &mut dyn Visitor) {
    let mut scopes = ScopeTree::new();
    let global = scopes.global();
    walk_statements(&program.body, global, &mut scopes, visitor);
}

/// Registers a statement list's declarations, then visits each statement.
fn walk_statements(
    statements: &[Statement<'_>],
    scope: ScopeId,
    scopes: &mut ScopeTree,
    visitor: &mut dyn Visitor,
) {
    for statement in statements {
        hoist_statement(statement, scope, scopes);
    }
    for statement in statements {
        visit_statement(statement, scope, scopes, visitor);
    }
}

/// Records the names a statement binds directly in `scope`.
fn hoist_statement(statement: &Statement<'_>, scope: ScopeId, scopes: &mut ScopeTree) {
    match statement {
        Statement::VariableDeclaration(declaration) => {
            for declarator in &declaration.declarations {
                scopes.bind_pattern(scope, &declarator.id);
            }
        }
        Statement::FunctionDeclaration(function) => {
            if let Some(id) = &function.id {
                scopes.bind(scope, id.name.as_str());
            }
        }
        Statement::ClassDeclaration(decl) => {
            if let Some(id) = &decl.id {
                scopes.bind(scope, id.name.as_str());
            }
        }
        Statement::ImportDeclaration(import) => {
            if let Some(specifiers) = &import.specifiers {
                for specifier in specifiers {
                    let local = match specifier {
                        ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
                    };
                    scopes.bind(scope, local.name.as_str());
                }
            }
        }
        Statement::ExportNamedDeclaration(export) => {
            if let Some(declaration) = &export.declaration {
                hoist_declaration(declaration, scope, scopes);
            }
        }
        _ => {}
    }
}

fn hoist_declaration(declaration: &Declaration<'_>, scope: ScopeId, scopes: &mut ScopeTree) {
    match declaration {
        Declaration::VariableDeclaration(decl) => {
            for declarator in &decl.declarations {
                scopes.bind_pattern(scope, &declarator.id);
            }
        }
        Declaration::FunctionDeclaration(function) => {
            if let Some(id) = &function.id {
                scopes.bind(scope, id.name.as_str());
            }
        }
        Declaration::ClassDeclaration(decl) => {
            if let Some(id) = &decl.id {
                scopes.bind(scope, id.name.as_str());
            }
        }
        _ => {}
    }
}

fn visit_statement(
    statement: &Statement<'_>,
    scope: ScopeId,
    scopes: &mut ScopeTree,
    visitor: &mut dyn Visitor,
) {
    match statement {
        Statement::ExpressionStatement(stmt) => {
            visit_expression(&stmt.expression, scope, scopes, visitor);
        }
        Statement::VariableDeclaration(declaration) => {
            for declarator in &declaration.declarations {
                if let Some(init) = &declarator.init {
                    visit_expression(init, scope, scopes, visitor);
                }
            }
        }
        Statement::FunctionDeclaration(function) => {
            walk_function(function, scope, scopes, visitor);
        }
        Statement::BlockStatement(block) => {
            let inner = scopes.push(scope);
            walk_statements(&block.body, inner, scopes, visitor);
        }
        Statement::IfStatement(stmt) => {
            visit_expression(&stmt.test, scope, scopes, visitor);
            visit_statement(&stmt.consequent, scope, scopes, visitor);
            if let Some(alternate) = &stmt.alternate {
                visit_statement(alternate, scope, scopes, visitor);
            }
        }
        Statement::ReturnStatement(stmt) => {
            if let Some(argument) = &stmt.argument {
                visit_expression(argument, scope, scopes, visitor);
            }
        }
        Statement::ThrowStatement(stmt) => {
            visit_expression(&stmt.argument, scope, scopes, visitor);
        }
        Statement::ForStatement(stmt) => {
            let inner = scopes.push(scope);
            if let Some(init) = &stmt.init {
                match init {
                    ForStatementInit::VariableDeclaration(declaration) => {
                        for declarator in &declaration.declarations {
                            scopes.bind_pattern(inner, &declarator.id);
                            if let Some(init) = &declarator.init {
                                visit_expression(init, inner, scopes, visitor);
                            }
                        }
                    }
                    _ => {
                        if let Some(expression) = init.as_expression() {
                            visit_expression(expression, inner, scopes, visitor);
                        }
                    }
                }
            }
            if let Some(test) = &stmt.test {
                visit_expression(test, inner, scopes, visitor);
            }
            if let Some(update) = &stmt.update {
                visit_expression(update, inner, scopes, visitor);
            }
            visit_statement(&stmt.body, inner, scopes, visitor);
        }
        Statement::ForInStatement(stmt) => {
            visit_expression(&stmt.right, scope, scopes, visitor);
            let inner = scopes.push(scope);
            if let ForStatementLeft::VariableDeclaration(declaration) = &stmt.left {
                for declarator in &declaration.declarations {
                    scopes.bind_pattern(inner, &declarator.id);
                }
            }
            visit_statement(&stmt.body, inner, scopes, visitor);
        }
        Statement::ForOfStatement(stmt) => {
            visit_expression(&stmt.right, scope, scopes, visitor);
            let inner = scopes.push(scope);
            if let ForStatementLeft::VariableDeclaration(declaration) = &stmt.left {
                for declarator in &declaration.declarations {
                    scopes.bind_pattern(inner, &declarator.id);
                }
            }
            visit_statement(&stmt.body, inner, scopes, visitor);
        }
        Statement::WhileStatement(stmt) => {
            visit_expression(&stmt.test, scope, scopes, visitor);
            visit_statement(&stmt.body, scope, scopes, visitor);
        }
        Statement::DoWhileStatement(stmt) => {
            visit_statement(&stmt.body, scope, scopes, visitor);
            visit_expression(&stmt.test, scope, scopes, visitor);
        }
        Statement::TryStatement(stmt) => {
            let try_scope = scopes.push(scope);
            walk_statements(&stmt.block.body, try_scope, scopes, visitor);
            if let Some(handler) = &stmt.handler {
                let catch_scope = scopes.push(scope);
                if let Some(param) = &handler.param {
                    scopes.bind_pattern(catch_scope, &param.pattern);
                }
                walk_statements(&handler.body.body, catch_scope, scopes, visitor);
            }
            if let Some(finalizer) = &stmt.finalizer {
                let finally_scope = scopes.push(scope);
                walk_statements(&finalizer.body, finally_scope, scopes, visitor);
            }
        }
        Statement::SwitchStatement(stmt) => {
            visit_expression(&stmt.discriminant, scope, scopes, visitor);
            let inner = scopes.push(scope);
            for case in &stmt.cases {
                for statement in &case.consequent {
                    hoist_statement(statement, inner, scopes);
                }
            }
            for case in &stmt.cases {
                if let Some(test) = &case.test {
                    visit_expression(test, inner, scopes, visitor);
                }
                for statement in &case.consequent {
                    visit_statement(statement, inner, scopes, visitor);
                }
            }
        }
        Statement::LabeledStatement(stmt) => {
            visit_statement(&stmt.body, scope, scopes, visitor);
        }
        Statement::ImportDeclaration(import) => {
            visitor.visit_import(import);
            visitor.visit_string_literal(&import.source);
        }
        Statement::ExportNamedDeclaration(export) => {
            if let Some(declaration) = &export.declaration {
                visit_declaration(declaration, scope, scopes, visitor);
            }
            if let Some(source) = &export.source {
                visitor.visit_string_literal(source);
            }
        }
        Statement::ExportDefaultDeclaration(export) => {
            if let Some(expression) = export.declaration.as_expression() {
                visit_expression(expression, scope, scopes, visitor);
            }
        }
        _ => {}
    }
}

fn visit_declaration(
    declaration: &Declaration<'_>,
    scope: ScopeId,
    scopes: &mut ScopeTree,
    visitor: &mut dyn Visitor,
) {
    match declaration {
        Declaration::VariableDeclaration(decl) => {
            for declarator in &decl.declarations {
                if let Some(init) = &declarator.init {
                    visit_expression(init, scope, scopes, visitor);
                }
            }
        }
        Declaration::FunctionDeclaration(function) => {
            walk_function(function, scope, scopes, visitor);
        }
        _ => {}
    }
}

/// Opens a function scope, binds its name and parameters, walks its body.
fn walk_function(
    function: &Function<'_>,
    parent: ScopeId,
    scopes: &mut ScopeTree,
    visitor: &mut dyn Visitor,
) {
    let scope = scopes.push(parent);
    if let Some(id) = &function.id {
        scopes.bind(scope, id.name.as_str());
    }
    for param in &function.params.items {
        scopes.bind_pattern(scope, &param.pattern);
    }
    if let Some(rest) = &function.params.rest {
        scopes.bind_pattern(scope, &rest.argument);
    }
    if let Some(body) = &function.body {
        walk_statements(&body.statements, scope, scopes, visitor);
    }
}

fn visit_call_expression(
    call: &CallExpression<'_>,
    scope: ScopeId,
    scopes: &mut ScopeTree,
    visitor: &mut dyn Visitor,
) {
    visitor.visit_call(call, scope, scopes);
    visit_expression(&call.callee, scope, scopes, visitor);
    for argument in &call.arguments {
        if let Some(expression) = argument.as_expression() {
            visit_expression(expression, scope, scopes, visitor);
        }
    }
}

fn visit_member_expression(
    member: &MemberExpression<'_>,
    scope: ScopeId,
    scopes: &mut ScopeTree,
    visitor: &mut dyn Visitor,
) {
    visit_expression(member.object(), scope, scopes, visitor);
    if let MemberExpression::ComputedMemberExpression(computed) = member {
        visit_expression(&computed.expression, scope, scopes, visitor);
    }
}

fn visit_expression(
    expression: &Expression<'_>,
    scope: ScopeId,
    scopes: &mut ScopeTree,
    visitor: &mut dyn Visitor,
) {
    match expression {
        Expression::StringLiteral(literal) => {
            visitor.visit_string_literal(literal);
        }
        Expression::CallExpression(call) => {
            visit_call_expression(call, scope, scopes, visitor);
        }
        Expression::NewExpression(new_expr) => {
            visit_expression(&new_expr.callee, scope, scopes, visitor);
            for argument in &new_expr.arguments {
                if let Some(expression) = argument.as_expression() {
                    visit_expression(expression, scope, scopes, visitor);
                }
            }
        }
        Expression::ArrowFunctionExpression(arrow) => {
            let inner = scopes.push(scope);
            for param in &arrow.params.items {
                scopes.bind_pattern(inner, &param.pattern);
            }
            if let Some(rest) = &arrow.params.rest {
                scopes.bind_pattern(inner, &rest.argument);
            }
            // Expression bodies arrive wrapped in a single statement.
            walk_statements(&arrow.body.statements, inner, scopes, visitor);
        }
        Expression::FunctionExpression(function) => {
            walk_function(function, scope, scopes, visitor);
        }
        Expression::TemplateLiteral(template) => {
            for expression in &template.expressions {
                visit_expression(expression, scope, scopes, visitor);
            }
        }
        Expression::TaggedTemplateExpression(tagged) => {
            visit_expression(&tagged.tag, scope, scopes, visitor);
            for expression in &tagged.quasi.expressions {
                visit_expression(expression, scope, scopes, visitor);
            }
        }
        Expression::ObjectExpression(object) => {
            for property in &object.properties {
                match property {
                    ObjectPropertyKind::ObjectProperty(prop) => {
                        if prop.computed {
                            if let Some(key) = prop.key.as_expression() {
                                visit_expression(key, scope, scopes, visitor);
                            }
                        }
                        visit_expression(&prop.value, scope, scopes, visitor);
                    }
                    ObjectPropertyKind::SpreadProperty(spread) => {
                        visit_expression(&spread.argument, scope, scopes, visitor);
                    }
                }
            }
        }
        Expression::ArrayExpression(array) => {
            for element in &array.elements {
                match element {
                    ArrayExpressionElement::SpreadElement(spread) => {
                        visit_expression(&spread.argument, scope, scopes, visitor);
                    }
                    ArrayExpressionElement::Elision(_) => {}
                    _ => {
                        if let Some(expression) = element.as_expression() {
                            visit_expression(expression, scope, scopes, visitor);
                        }
                    }
                }
            }
        }
        Expression::BinaryExpression(binary) => {
            visit_expression(&binary.left, scope, scopes, visitor);
            visit_expression(&binary.right, scope, scopes, visitor);
        }
        Expression::LogicalExpression(logical) => {
            visit_expression(&logical.left, scope, scopes, visitor);
            visit_expression(&logical.right, scope, scopes, visitor);
        }
        Expression::ConditionalExpression(conditional) => {
            visit_expression(&conditional.test, scope, scopes, visitor);
            visit_expression(&conditional.consequent, scope, scopes, visitor);
            visit_expression(&conditional.alternate, scope, scopes, visitor);
        }
        Expression::UnaryExpression(unary) => {
            visit_expression(&unary.argument, scope, scopes, visitor);
        }
        Expression::AwaitExpression(await_expr) => {
            visit_expression(&await_expr.argument, scope, scopes, visitor);
        }
        Expression::ParenthesizedExpression(paren) => {
            visit_expression(&paren.expression, scope, scopes, visitor);
        }
        Expression::SequenceExpression(sequence) => {
            for expression in &sequence.expressions {
                visit_expression(expression, scope, scopes, visitor);
            }
        }
        Expression::AssignmentExpression(assignment) => {
            visit_expression(&assignment.right, scope, scopes, visitor);
        }
        Expression::ChainExpression(chain) => match &chain.expression {
            ChainElement::CallExpression(call) => {
                visit_call_expression(call, scope, scopes, visitor);
            }
            _ => {
                if let Some(member) = chain.expression.as_member_expression() {
                    visit_member_expression(member, scope, scopes, visitor);
                }
            }
        },
        _ => {
            if let Some(member) = expression.as_member_expression() {
                visit_member_expression(member, scope, scopes, visitor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    /// Records every bare-identifier call together with its shadowing status.
    #[derive(Default)]
    struct CallRecorder {
        calls: Vec<(String, bool)>,
        literals: Vec<String>,
        imports: Vec<String>,
    }

    impl Visitor for CallRecorder {
        fn visit_call(&mut self, call: &CallExpression<'_>, scope: ScopeId, scopes: &ScopeTree) {
            if let Expression::Identifier(ident) = &call.callee {
                let shadowed = scopes.is_locally_bound(ident.name.as_str(), scope);
                self.calls.push((ident.name.to_string(), shadowed));
            }
        }

        fn visit_string_literal(&mut self, literal: &StringLiteral<'_>) {
            self.literals.push(literal.value.to_string());
        }

        fn visit_import(&mut self, import: &ImportDeclaration<'_>) {
            self.imports.push(import.source.value.to_string());
        }
    }

    fn record(source: &str) -> CallRecorder {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        assert!(!ret.panicked, "fixture failed to parse");
        let mut recorder = CallRecorder::default();
        walk_program(&ret.program, &mut recorder);
        recorder
    }

    #[test]
    fn finds_nested_calls() {
        let recorder = record("describe('suite', () => { it('t', () => { expect(1) }) })");
        let names: Vec<_> = recorder.calls.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["describe", "it", "expect"]);
    }

    #[test]
    fn parameter_shadows_inside_callback() {
        let recorder = record("const run = (it) => { it('x') }");
        assert_eq!(recorder.calls, vec![("it".to_string(), true)]);
    }

    #[test]
    fn local_function_declaration_shadows_later_calls() {
        let recorder = record("it('a');\nfunction it(name) {}\nit('b');");
        assert_eq!(
            recorder.calls,
            vec![("it".to_string(), true), ("it".to_string(), true)]
        );
    }

    #[test]
    fn block_scoped_binding_does_not_shadow_outside() {
        let recorder = record("{ const describe = 1; }\ndescribe('x', () => {})");
        assert_eq!(recorder.calls, vec![("describe".to_string(), false)]);
    }

    #[test]
    fn import_binding_shadows_globally() {
        let recorder = record("import { it } from 'vitest';\nit('x', () => {})");
        assert_eq!(recorder.calls, vec![("it".to_string(), true)]);
        assert_eq!(recorder.imports, vec!["vitest".to_string()]);
    }

    #[test]
    fn destructured_and_catch_bindings_shadow() {
        let recorder = record(
            "const { beforeEach } = helpers;\nbeforeEach(() => {});\ntry {} catch (afterAll) { afterAll() }",
        );
        assert_eq!(
            recorder.calls,
            vec![("beforeEach".to_string(), true), ("afterAll".to_string(), true)]
        );
    }

    #[test]
    fn collects_string_literals_everywhere() {
        let recorder = record("it('a', () => { expect(x).toBe(\"b\") })");
        assert_eq!(recorder.literals, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn calls_inside_loops_and_conditionals_are_visited() {
        let recorder =
            record("for (const c of cases) { it(c, () => {}) }\nif (flag) { describe('d', f) }");
        let names: Vec<_> = recorder.calls.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["it", "describe"]);
    }
}
