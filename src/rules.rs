//! The rewrite rule table.
//!
//! Maps each legacy Mocha-style API name to its Playwright Test equivalent,
//! together with the argument policy for that call: whether the target form
//! accepts a leading string description, and which modifier suffixes
//! (`.only`, `.skip`) are valid on the legacy name.

/// A single legacy-to-target rewrite mapping.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    /// Legacy API name matched as a bare-identifier callee.
    pub legacy: &'static str,
    /// Fully qualified replacement callee.
    pub target: &'static str,
    /// Whether the target call accepts a leading string description.
    /// Lifecycle hooks do not; a leading string literal is stripped for them.
    pub description_allowed: bool,
    /// Modifier suffixes recognized in `legacy.modifier(...)` position.
    pub modifiers: &'static [&'static str],
}

const RUN_MODIFIERS: &[&str] = &["only", "skip"];

/// All rewrite rules, iterated in this fixed order.
pub const RULES: &[RewriteRule] = &[
    RewriteRule {
        legacy: "describe",
        target: "test.describe",
        description_allowed: true,
        modifiers: RUN_MODIFIERS,
    },
    RewriteRule {
        legacy: "it",
        target: "test",
        description_allowed: true,
        modifiers: RUN_MODIFIERS,
    },
    RewriteRule {
        legacy: "xdescribe",
        target: "test.describe.skip",
        description_allowed: true,
        modifiers: &[],
    },
    RewriteRule {
        legacy: "xit",
        target: "test.skip",
        description_allowed: true,
        modifiers: &[],
    },
    RewriteRule {
        legacy: "beforeAll",
        target: "test.beforeAll",
        description_allowed: false,
        modifiers: &[],
    },
    RewriteRule {
        legacy: "afterAll",
        target: "test.afterAll",
        description_allowed: false,
        modifiers: &[],
    },
    RewriteRule {
        legacy: "beforeEach",
        target: "test.beforeEach",
        description_allowed: false,
        modifiers: &[],
    },
    RewriteRule {
        legacy: "afterEach",
        target: "test.afterEach",
        description_allowed: false,
        modifiers: &[],
    },
];

/// Looks up the rule for a legacy API name, if any.
pub fn lookup(name: &str) -> Option<&'static RewriteRule> {
    RULES.iter().find(|rule| rule.legacy == name)
}

impl RewriteRule {
    /// Whether `modifier` is valid in `legacy.modifier(...)` position.
    pub fn allows_modifier(&self, modifier: &str) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Whether a single-string call to this rule synthesizes a skipped stub.
    ///
    /// Limited to rules whose own modifier set includes `skip`; targets that
    /// already encode a skip (`test.skip`, `test.describe.skip`) must not
    /// have the modifier doubled.
    pub fn supports_stub_synthesis(&self) -> bool {
        self.allows_modifier("skip")
    }
}
