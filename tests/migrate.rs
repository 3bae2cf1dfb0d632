//! End-to-end migration tests over fixture files.

use pw_codemod::transform::{transform_file, transform_source};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap()
}

#[test]
fn migrates_smoke_fixture() {
    let input = read_fixture("smoke.input.ts");
    let output = transform_source(&input, &fixture("smoke.input.ts")).unwrap();
    assert_eq!(output, read_fixture("smoke.expected.ts"));
}

#[test]
fn migrates_checkout_fixture() {
    let input = read_fixture("checkout.input.ts");
    let output = transform_source(&input, &fixture("checkout.input.ts")).unwrap();
    assert_eq!(output, read_fixture("checkout.expected.ts"));
}

#[test]
fn migrated_fixtures_are_stable_under_a_second_run() {
    for name in ["smoke.expected.ts", "checkout.expected.ts"] {
        let migrated = read_fixture(name);
        let again = transform_source(&migrated, &fixture(name)).unwrap();
        assert_eq!(again, migrated, "{name} drifted on a second run");
    }
}

#[test]
fn write_mode_persists_and_dry_run_does_not() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("login.test.ts");
    let original = "it('logs in', () => { expect(ok).toBe(true) })\n";
    fs::write(&path, original).unwrap();

    // Dry run reports the change but leaves the file alone.
    let outcome = transform_file(&path, false).unwrap();
    assert!(outcome.changed);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    // Write mode persists.
    let outcome = transform_file(&path, true).unwrap();
    assert!(outcome.changed);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "import { test, expect } from '@playwright/test';\n\
         test('logs in', () => { expect(ok).toBe(true) })\n"
    );

    // A second write pass finds nothing left to do.
    let outcome = transform_file(&path, true).unwrap();
    assert!(!outcome.changed);
}

#[test]
fn unparseable_file_is_reported_and_left_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.test.ts");
    fs::write(&path, "describe('oops\n").unwrap();

    let error = transform_file(&path, true).unwrap_err();
    assert!(format!("{error:#}").contains("broken.test.ts"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "describe('oops\n");
}

#[test]
fn shadowed_suites_survive_untouched() {
    let source = "const describe = makeLogger();\n\
                  const it = describe.child();\n\
                  describe('section');\n\
                  it('entry');\n";
    let output = transform_source(source, Path::new("logger.test.ts")).unwrap();
    assert_eq!(
        output,
        "import { test } from '@playwright/test';\n\
         const describe = makeLogger();\n\
         const it = describe.child();\n\
         describe('section');\n\
         it('entry');\n"
    );
}
