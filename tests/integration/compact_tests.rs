//! End-to-end compaction through the CLI entry point

use crate::common::{sample_dumps, CliTestRunner, TODAY};
use std::fs;

#[test]
fn test_compact_schema_and_data_in_one_run() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();

    fixture
        .add_schema("2020-03-01", &sample_dumps::schema(&["CREATE TABLE a", "CREATE TABLE b"]))
        .unwrap();
    fixture
        .add_schema("2020-03-02", &sample_dumps::schema(&["CREATE TABLE a", "CREATE TABLE b"]))
        .unwrap();
    fixture
        .add_data("2020-03-01", &sample_dumps::data(&[("COPY a FROM stdin", &["1", "2"])]))
        .unwrap();
    fixture
        .add_data("2020-03-02", &sample_dumps::data(&[("COPY a FROM stdin", &["1", "2", "3"])]))
        .unwrap();

    runner.expect_success(&["compact", "--today", TODAY, "--no-progress"]);

    // Baselines are left as they were
    assert_eq!(
        fixture.read("2020-03-01", "schema.sql").unwrap(),
        sample_dumps::schema(&["CREATE TABLE a", "CREATE TABLE b"])
    );
    assert!(!fixture.exists("2020-03-02", "schema.sql"));
    assert_eq!(
        fixture.read("2020-03-02", "data.sql").unwrap(),
        "COPY a FROM stdin;\n3\n\\.\n\n-- end of data\n"
    );
}

#[test]
fn test_bare_invocation_compacts() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fixture.add_data("2001-01-01", "k;\nrow\n\\.\n").unwrap();
    fixture.add_data("2001-01-02", "k;\nrow\n\\.\n").unwrap();

    runner.expect_success(&[]);

    assert!(fixture.exists("2001-01-01", "data.sql"));
    assert!(!fixture.exists("2001-01-02", "data.sql"));
}

#[test]
fn test_recent_dumps_are_untouched() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let content = sample_dumps::schema(&["CREATE TABLE a"]);
    fixture.add_schema("2030-06-10", &content).unwrap();
    fixture.add_schema("2030-06-11", &content).unwrap();

    runner.expect_success(&["compact", "--today", TODAY, "--no-progress"]);

    assert_eq!(fixture.read("2030-06-10", "schema.sql").unwrap(), content);
    assert_eq!(fixture.read("2030-06-11", "schema.sql").unwrap(), content);
    assert!(!fixture.exists("2030-06-11", "reference_sql"));
}

#[test]
fn test_dry_run_modifies_nothing() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let first = sample_dumps::schema(&["CREATE TABLE a"]);
    let second = sample_dumps::schema(&["CREATE TABLE a", "CREATE TABLE b"]);
    fixture.add_schema("2020-03-01", &first).unwrap();
    fixture.add_schema("2020-03-02", &first).unwrap();
    fixture.add_schema("2020-03-03", &second).unwrap();

    runner.expect_success(&["compact", "--dry-run", "--today", TODAY, "--json"]);

    assert_eq!(fixture.read("2020-03-01", "schema.sql").unwrap(), first);
    assert_eq!(fixture.read("2020-03-02", "schema.sql").unwrap(), first);
    assert_eq!(fixture.read("2020-03-03", "schema.sql").unwrap(), second);
    assert!(!fixture.exists("2020-03-02", "reference_sql"));
}

#[test]
fn test_schema_output_from_config_file() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fs::write(
        fixture.root().join("sqlcompact.json"),
        r#"{"schema_output": "increment", "reference_file": "previous_dump"}"#,
    )
    .unwrap();
    fixture
        .add_schema("2020-03-01", &sample_dumps::schema(&["CREATE TABLE a", "INSERT INTO a VALUES (1)"]))
        .unwrap();
    fixture
        .add_schema("2020-03-02", &sample_dumps::schema(&["CREATE TABLE a", "INSERT INTO a VALUES (2)"]))
        .unwrap();

    runner.expect_success(&["compact", "--today", TODAY, "--no-progress"]);

    assert_eq!(
        fixture.read("2020-03-02", "schema.sql").unwrap(),
        sample_dumps::schema(&["INSERT INTO a VALUES (2)"])
    );
    assert!(fixture.exists("2020-03-02", "previous_dump"));
    assert!(!fixture.exists("2020-03-02", "reference_sql"));
}

#[test]
fn test_cli_schema_output_overrides_config() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fs::write(fixture.root().join("sqlcompact.json"), r#"{"schema_output": "increment"}"#).unwrap();
    fixture.add_schema("2020-03-01", "A;B;").unwrap();
    fixture.add_schema("2020-03-02", "A;C;").unwrap();

    runner.expect_success(&["compact", "--today", TODAY, "--schema-output", "ledger", "--no-progress"]);

    assert_eq!(fixture.read("2020-03-02", "schema.sql").unwrap(), "A;B;C;");
}

#[test]
fn test_invalid_schema_output_is_rejected() {
    let runner = CliTestRunner::new().unwrap();
    let err = runner.expect_failure(&["compact", "--schema-output", "sideways"]);
    assert!(matches!(err, sqlcompact::CompactError::InvalidInput { .. }));
}

#[test]
fn test_missing_root_is_rejected() {
    let runner = CliTestRunner::new().unwrap();
    let missing = runner.fixture().root().join("nowhere");
    let err = runner.expect_failure(&["--root", missing.to_str().unwrap(), "compact", "--no-progress"]);
    assert!(matches!(err, sqlcompact::CompactError::InvalidInput { .. }));
}
