//! Runs every YAML fixture under `tests/fixtures/`.

use unimatch_test::fixtures::{load_fixtures, Fixture};

fn run(file: &str, yaml: &str) {
    let fixtures: Vec<Fixture> = load_fixtures(yaml)
        .unwrap_or_else(|e| panic!("{file}: failed to parse fixtures: {e}"));
    assert!(!fixtures.is_empty(), "{file}: no fixtures");

    for fixture in &fixtures {
        let matcher = fixture
            .compile()
            .unwrap_or_else(|e| panic!("{file}/{}: failed to compile: {e}", fixture.name));
        assert!(!fixture.cases.is_empty(), "{file}/{}: no cases", fixture.name);
        for case in &fixture.cases {
            assert_eq!(
                matcher.evaluate(&case.context),
                case.expect,
                "{file}/{}/{}",
                fixture.name,
                case.name
            );
        }
    }
}

#[test]
fn core_semantics() {
    run(
        "core_semantics.yaml",
        include_str!("fixtures/core_semantics.yaml"),
    );
}

#[test]
fn boolean_logic() {
    run(
        "boolean_logic.yaml",
        include_str!("fixtures/boolean_logic.yaml"),
    );
}

#[test]
fn nested_matchers() {
    run(
        "nested_matchers.yaml",
        include_str!("fixtures/nested_matchers.yaml"),
    );
}

#[test]
fn fixtures_are_deterministic() {
    let fixtures = load_fixtures(include_str!("fixtures/core_semantics.yaml")).unwrap();
    let matcher = fixtures[0].compile().unwrap();
    let ctx = fixtures[0].cases[0].context.clone();
    let first = matcher.evaluate(&ctx);
    for _ in 0..8 {
        assert_eq!(matcher.evaluate(&ctx), first);
    }
}
