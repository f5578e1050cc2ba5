use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn format_prints_normalized_document() {
    let tmp = tempdir().unwrap();
    let doc = tmp.path().join("post.md");
    fs::write(&doc, "---\ntitle:    Hi\ntags: [a, b]\n---\nBody").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fencepost"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["format", "--timezone", "utc"]).arg(&doc);
    cmd.assert().success().stdout("---\ntitle: Hi\ntags:\n- a\n- b\n---\nBody");
}

#[test]
fn format_keeps_json_framing() {
    let tmp = tempdir().unwrap();
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("fencepost"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["format", "--timezone", "utc"]).write_stdin("\"a\":1,\"b\":[1,2]\n;;;\nBody");
    cmd.assert()
        .success()
        .stdout("\"a\": 1,\n\"b\": [\n  1,\n  2\n]\n;;;\nBody");
}

#[test]
fn format_write_rewrites_then_reports_unchanged() {
    let tmp = tempdir().unwrap();
    let doc = tmp.path().join("post.md");
    fs::write(&doc, "title:   Hi\ndate: 2020-01-01 00:00:00\n---\nBody").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fencepost"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["format", "--write", "--timezone", "+02:00"]).arg(&doc);
    cmd.assert().success().stdout(predicate::str::starts_with("formatted:"));

    assert_eq!(
        fs::read_to_string(&doc).unwrap(),
        "title: Hi\ndate: 2020-01-01 00:00:00\n---\nBody"
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fencepost"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["format", "--write", "--timezone", "+02:00"]).arg(&doc);
    cmd.assert().success().stdout(predicate::str::starts_with("unchanged:"));
}

#[test]
fn format_leaves_plain_text_alone() {
    let tmp = tempdir().unwrap();
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("fencepost"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("format").write_stdin("# Title\n\nNo metadata here.\n");
    cmd.assert().success().stdout("# Title\n\nNo metadata here.\n");
}

#[test]
fn format_write_requires_a_file() {
    let tmp = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fencepost"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["format", "--write"]);
    cmd.assert().failure();
}

#[test]
fn format_keeps_quoted_timestamp_strings() {
    let tmp = tempdir().unwrap();
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("fencepost"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["format", "--timezone", "utc"])
        .write_stdin("---\nversion: \"2020-01-01\"\ndate: 2020-01-01\n---\nBody");
    cmd.assert()
        .success()
        .stdout("---\nversion: \"2020-01-01\"\ndate: 2020-01-01 00:00:00\n---\nBody");
}
