#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::k6docs_cmd;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_checkout(root: &Path) {
    let docs = root.join("docs/sources/k6/v1.5.x");
    fs::create_dir_all(docs.join("using-k6")).unwrap();
    fs::write(docs.join("_index.md"), "---\ntitle: k6\n---\n").unwrap();
    fs::write(
        docs.join("using-k6/_index.md"),
        "---\ntitle: Using k6\ndescription: Core concepts\nweight: 1\n---\n# Using k6\n",
    )
    .unwrap();
    fs::write(
        docs.join("using-k6/checks.md"),
        "---\ntitle: Checks\ndescription: Validate responses\nweight: 2\n---\n# Checks\n\nChecks in <K6_VERSION>.\n",
    )
    .unwrap();
}

#[test]
fn prepared_bundle_can_be_browsed() {
    // Given: a docs checkout and an empty output directory
    let checkout = TempDir::new().unwrap();
    write_checkout(checkout.path());
    let output = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();

    // When: preparing the bundle
    k6docs_cmd(config_dir.path())
        .arg("prepare")
        .arg("--docs-path")
        .arg(checkout.path())
        .args(["--k6-version", "v1.5.2", "--output-dir"])
        .arg(output.path())
        .assert()
        .success()
        .stdout(contains("sections for v1.5.x"));

    // Then: the bundle serves topics
    k6docs_cmd(config_dir.path())
        .env("K6_DOCS_CACHE_DIR", output.path())
        .env("K6_DOCS_VERSION", "v1.5.x")
        .args(["using-k6", "checks"])
        .assert()
        .success()
        .stdout("# Checks\n\nChecks in v1.5.x.\n");
}

#[test]
fn prepare_fails_for_missing_version() {
    let checkout = TempDir::new().unwrap();
    write_checkout(checkout.path());
    let output = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();

    k6docs_cmd(config_dir.path())
        .arg("prepare")
        .arg("--docs-path")
        .arg(checkout.path())
        .args(["--k6-version", "v0.1.0", "--output-dir"])
        .arg(output.path())
        .assert()
        .failure()
        .stderr(contains("failed to prepare docs"));
}
