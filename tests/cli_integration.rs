//! Integration tests for the docversions binary.
//!
//! These tests exercise the full CLI against temporary project directories.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for running docversions in `dir`.
fn docversions(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docversions").unwrap();
    cmd.env_remove("DOCVERSIONS_CONFIG")
        .env_remove("DOCVERSIONS_LOG")
        .arg("--cwd")
        .arg(dir);
    cmd
}

fn project(version: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        format!("{{ \"version\": \"{}\" }}", version),
    )
    .unwrap();
    dir
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("docversions")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docversions"));
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("docversions")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("finalize"))
        .stdout(predicate::str::contains("out-dir"));
}

#[test]
fn out_dir_prints_target() {
    let dir = project("1.2.3");
    let expected = dir.path().join("docs").join("v1.2.3");

    docversions(dir.path())
        .arg("out-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));

    assert!(!dir.path().join("docs").exists(), "out-dir must not write");
}

#[test]
fn out_dir_honors_monorepo_flags() {
    let dir = project("0.4.0");
    let expected = dir.path().join("site").join("core").join("v0.4.0");

    docversions(dir.path())
        .args(["out-dir", "--monorepo-name", "core", "--monorepo-root", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn config_file_is_read() {
    let dir = project("1.0.0");
    fs::write(dir.path().join("docversions.toml"), "out = \"public/api\"\n").unwrap();
    let expected = dir.path().join("public/api").join("v1.0.0");

    docversions(dir.path())
        .arg("out-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn unknown_config_key_fails() {
    let dir = project("1.0.0");
    fs::write(dir.path().join("docversions.toml"), "outdir = \"x\"\n").unwrap();

    docversions(dir.path())
        .arg("out-dir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_monorepo_name_fails() {
    let dir = project("1.0.0");

    docversions(dir.path())
        .args(["finalize", "--monorepo-name", "no/slashes", "--monorepo-root", "site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("monorepo.name"));

    assert!(!dir.path().join("site").exists());
}

#[test]
fn missing_manifest_fails() {
    let dir = TempDir::new().unwrap();

    docversions(dir.path())
        .arg("out-dir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json"));
}

#[test]
fn invalid_manifest_version_fails() {
    let dir = project("latest");

    docversions(dir.path())
        .arg("out-dir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("latest"));
}

#[cfg(unix)]
#[test]
fn finalize_builds_tree() {
    let dir = project("1.0.0");
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("v1.0.0")).unwrap();

    docversions(dir.path())
        .arg("finalize")
        .assert()
        .success()
        .stdout(predicate::str::contains("Finalized v1.0.0"));

    assert_eq!(fs::read_link(docs.join("stable")).unwrap(), docs.join("v1.0.0"));
    assert!(docs.join("versions.js").is_file());
    assert!(docs.join(".docversions").is_file());
}

#[cfg(unix)]
#[test]
fn finalize_with_relative_cwd_links_absolutely() {
    let parent = TempDir::new().unwrap();
    let proj = parent.path().join("proj");
    let docs = proj.join("docs");
    fs::create_dir_all(docs.join("v1.0.0")).unwrap();
    fs::write(proj.join("package.json"), r#"{ "version": "1.0.0" }"#).unwrap();

    Command::cargo_bin("docversions")
        .unwrap()
        .env_remove("DOCVERSIONS_CONFIG")
        .env_remove("DOCVERSIONS_LOG")
        .current_dir(parent.path())
        .args(["--cwd", "proj", "finalize"])
        .assert()
        .success();

    let target = fs::read_link(docs.join("stable")).unwrap();
    assert!(target.is_absolute(), "got {}", target.display());
    assert!(docs.join("stable").is_dir());
    assert!(docs.join("v1.0").is_dir());
}

#[cfg(unix)]
#[test]
fn finalize_removes_dangling_minor_link() {
    let dir = project("1.1.0");
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("v1.1.0")).unwrap();
    std::os::unix::fs::symlink(docs.join("v1.0.0"), docs.join("v1.0")).unwrap();

    docversions(dir.path())
        .arg("finalize")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed stale link v1.0"));

    assert!(fs::symlink_metadata(docs.join("v1.0")).is_err());
    assert!(docs.join("v1.1").is_dir());
}

#[cfg(unix)]
#[test]
fn finalize_quiet_prints_nothing() {
    let dir = project("1.0.0");
    fs::create_dir_all(dir.path().join("docs/v1.0.0")).unwrap();

    docversions(dir.path())
        .args(["finalize", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn finalize_without_render_fails() {
    let dir = project("1.0.0");

    docversions(dir.path())
        .arg("finalize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn status_reports_without_writing() {
    let dir = project("1.1.0");
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("v1.0.0")).unwrap();
    fs::create_dir_all(docs.join("v1.1.0")).unwrap();

    docversions(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stable: v1.1.0"))
        .stdout(predicate::str::contains("Pending metadata changes:"));

    assert!(!docs.join(".docversions").exists());
}

#[test]
fn status_json() {
    let dir = project("2.0.0-beta.1");
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("v1.0.0")).unwrap();

    let output = docversions(dir.path())
        .args(["status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["version"], "v2.0.0-beta.1");
    assert_eq!(json["stable"], "v1.0.0");
    assert_eq!(json["dev"], "v2.0.0-beta.1");
    assert_eq!(
        json["versions"],
        serde_json::json!(["v2.0.0-beta.1", "v1.0.0"])
    );
    assert_eq!(json["links"][0]["name"], "stable");
}

#[test]
fn completion_bash() {
    Command::cargo_bin("docversions")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docversions"));
}
