use std::io::Write as _;

use assert_cmd::Command;
use predicates::prelude::*;

fn provider_command() -> Command {
    Command::cargo_bin("servicecatalog-provider").expect("binary builds")
}

#[test]
fn help_lists_both_providers() {
    provider_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("service-action"))
        .stdout(predicate::str::contains("service-action-association"));
}

#[test]
fn rejects_unknown_action() {
    provider_command()
        .args([
            "service-action",
            "--action",
            "destroy",
            "--request",
            "request.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}

#[test]
fn rejects_missing_request_file() {
    provider_command()
        .args([
            "service-action",
            "--action",
            "read",
            "--request",
            "does-not-exist.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read request file"));
}

#[test]
fn rejects_malformed_request_document() {
    let mut request_file = tempfile::NamedTempFile::new().expect("temp file");
    request_file
        .write_all(b"this is not a handler request")
        .expect("write succeeds");

    provider_command()
        .args(["service-action-association", "--action", "create", "--request"])
        .arg(request_file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid handler request"));
}
