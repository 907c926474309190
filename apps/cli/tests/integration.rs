pub mod fixtures;

use fixtures::*;
use predicates::prelude::*;

#[test]
fn missing_subcommand_prints_usage() {
    forma().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn inspect_prints_outline() {
    let document = temp_file(DOCUMENT);

    forma()
        .arg("inspect")
        .arg(document.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Card v1.2.0 (fallback)"))
        .stdout(predicate::str::contains("  footer: Button (fallback)"))
        .stdout(predicate::str::contains("    label: \"Ok\""));
}

#[test]
fn inspect_emit_from_stdin_round_trips() {
    forma()
        .args(["inspect", "-", "--emit"])
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(format!("{DOCUMENT}\n"));
}

#[test]
fn inspect_rejects_invalid_json() {
    forma()
        .args(["inspect", "-"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document could not be deserialized"));
}

#[test]
fn render_resolves_selected_and_fetched_groups() {
    let records = temp_file(RECORDS);

    forma()
        .arg("render")
        .arg("--data")
        .arg(records.path())
        .arg("{{ user.name }} ({{ user.roles.0 }}) @ {{ site.name }}{{ missing.value }}")
        .assert()
        .success()
        .stdout("Ann (admin) @ Forma\n");
}

#[test]
fn render_without_cache_gives_the_same_output() {
    let records = temp_file(RECORDS);

    forma()
        .arg("render")
        .arg("--no-cache")
        .arg("--data")
        .arg(records.path())
        .arg("Hi {{ user.name }}")
        .assert()
        .success()
        .stdout("Hi Ann\n");
}

#[test]
fn render_reports_expression_errors() {
    let records = temp_file(RECORDS);

    forma()
        .arg("render")
        .arg("--data")
        .arg(records.path())
        .arg("Hi {{ user.name")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expression syntax error"));
}

#[test]
fn render_rejects_malformed_record_sets() {
    let records = temp_file(r#"{"collections": {"user": {"name": "Ann"}}}"#);

    forma()
        .arg("render")
        .arg("--data")
        .arg(records.path())
        .arg("{{ user.name }}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a record set"));
}

#[test]
fn config_file_must_exist() {
    forma()
        .args(["--config", "/nonexistent/forma.toml", "inspect", "-"])
        .write_stdin(DOCUMENT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}
