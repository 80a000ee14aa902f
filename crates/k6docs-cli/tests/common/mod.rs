#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

const MANIFEST: &str = r#"{
  "version": "v1.5.x",
  "sections": [
    {"slug": "using-k6", "rel_path": "using-k6/_index.md", "title": "Using k6",
     "description": "Core k6 concepts", "weight": 1, "category": "using-k6", "is_index": true,
     "children": ["using-k6/checks", "using-k6/thresholds"]},
    {"slug": "using-k6/checks", "rel_path": "using-k6/checks.md", "title": "Checks",
     "description": "Validate responses", "weight": 2, "category": "using-k6"},
    {"slug": "using-k6/thresholds", "rel_path": "using-k6/thresholds.md", "title": "Thresholds",
     "description": "Pass/fail criteria", "weight": 1, "category": "using-k6"},
    {"slug": "javascript-api", "rel_path": "javascript-api/_index.md", "title": "JavaScript API",
     "description": "API reference", "weight": 2, "category": "javascript-api", "is_index": true,
     "children": ["javascript-api/k6-http"]},
    {"slug": "javascript-api/k6-http", "rel_path": "javascript-api/k6-http/_index.md", "title": "k6/http",
     "description": "HTTP requests", "weight": 1, "category": "javascript-api", "is_index": true,
     "children": ["javascript-api/k6-http/get"]},
    {"slug": "javascript-api/k6-http/get", "rel_path": "javascript-api/k6-http/get.md",
     "title": "get( url, [params] )", "description": "Issue a GET request", "weight": 1,
     "category": "javascript-api"}
  ]
}"#;

const PAGES: &[(&str, &str)] = &[
    ("using-k6/_index.md", "# Using k6\n"),
    ("using-k6/checks.md", "---\ntitle: Checks\n---\n# Checks\n\nChecks in k6 <K6_VERSION>.\n"),
    (
        "using-k6/thresholds.md",
        "# Thresholds\n\n{{< admonition type=\"note\" >}}\nThresholds fail the test.\n{{< /admonition >}}\n",
    ),
    ("javascript-api/_index.md", "# JavaScript API\n"),
    ("javascript-api/k6-http/_index.md", "# k6/http\n\nMake HTTP requests.\n"),
    ("javascript-api/k6-http/get.md", "# get( url, [params] )\n\n<!-- internal note -->\nSends a GET.\n"),
];

/// Write a prepared bundle into `root`.
#[allow(dead_code)]
pub fn write_bundle(root: &Path) {
    fs::create_dir_all(root).unwrap();
    fs::write(root.join("sections.json"), MANIFEST).unwrap();
    for (rel, content) in PAGES {
        let path = root.join("markdown").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    fs::write(
        root.join("best_practices.md"),
        "---\ntitle: Best Practices\n---\n# k6 Best Practices\n\nFor k6 <K6_VERSION>.\n",
    )
    .unwrap();
}

/// A temporary bundle plus an empty config directory.
#[allow(dead_code)]
pub struct Fixture {
    pub bundle: TempDir,
    pub config_dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let bundle = tempfile::tempdir().expect("failed to create bundle dir");
        write_bundle(bundle.path());
        let config_dir = tempfile::tempdir().expect("failed to create config dir");
        Self { bundle, config_dir }
    }

    /// A `k6docs` command pointed at this fixture.
    pub fn cmd(&self) -> Command {
        let mut cmd = k6docs_cmd(self.config_dir.path());
        cmd.env("K6_DOCS_CACHE_DIR", self.bundle.path());
        cmd.env("K6_DOCS_VERSION", "v1.5.x");
        cmd
    }
}

/// Create a configured `k6docs` command suitable for integration tests.
#[allow(dead_code)]
pub fn k6docs_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("k6docs"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("K6DOCS_CONFIG");
    cmd.env_remove("K6_DOCS_VERSION");
    cmd.env_remove("K6_DOCS_CACHE_DIR");
    cmd.env("K6DOCS_CONFIG_DIR", config_dir);
    cmd.env("NO_COLOR", "1");
    cmd
}
