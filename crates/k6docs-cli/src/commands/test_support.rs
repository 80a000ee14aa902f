//! Bundle fixture for command tests.

use anyhow::Result;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

use super::Session;

pub const MANIFEST: &str = r#"{
  "version": "v1.5.x",
  "sections": [
    {"slug": "using-k6", "rel_path": "using-k6/_index.md", "title": "Using k6",
     "description": "Core k6 concepts", "weight": 1, "category": "using-k6", "is_index": true,
     "children": ["using-k6/checks", "using-k6/scenarios", "using-k6/ghost"]},
    {"slug": "using-k6/checks", "rel_path": "using-k6/checks.md", "title": "Checks",
     "description": "Validate responses without failing the test", "weight": 300, "category": "using-k6"},
    {"slug": "using-k6/scenarios", "rel_path": "using-k6/scenarios/_index.md", "title": "Scenarios",
     "description": "Model diverse workloads", "weight": 200, "category": "using-k6", "is_index": true},
    {"slug": "javascript-api", "rel_path": "javascript-api/_index.md", "title": "JavaScript API",
     "description": "k6 JavaScript API reference", "weight": 2, "category": "javascript-api", "is_index": true,
     "children": ["javascript-api/k6-http", "javascript-api/k6-browser"]},
    {"slug": "javascript-api/k6-http", "rel_path": "javascript-api/k6-http/_index.md", "title": "k6/http",
     "description": "HTTP requests", "weight": 10, "category": "javascript-api", "is_index": true,
     "children": ["javascript-api/k6-http/get", "javascript-api/k6-http/post"]},
    {"slug": "javascript-api/k6-http/get", "rel_path": "javascript-api/k6-http/get.md",
     "title": "get( url, [params] )", "description": "Issue an HTTP GET request.", "weight": 20,
     "category": "javascript-api"},
    {"slug": "javascript-api/k6-http/post", "rel_path": "javascript-api/k6-http/post.md",
     "title": "post( url, [body], [params] )", "description": "Issue an HTTP POST request.", "weight": 10,
     "category": "javascript-api"},
    {"slug": "javascript-api/k6-browser", "rel_path": "javascript-api/k6-browser/_index.md",
     "title": "k6/browser", "description": "Browser automation", "weight": 5, "category": "javascript-api",
     "is_index": true, "children": ["javascript-api/k6-browser/closecontext"]},
    {"slug": "javascript-api/k6-browser/closecontext", "rel_path": "javascript-api/k6-browser/closecontext.md",
     "title": "CloseContext", "description": "Close the browser context.", "weight": 1,
     "category": "javascript-api"},
    {"slug": "examples", "rel_path": "examples/_index.md", "title": "Examples",
     "description": "Sample scripts", "weight": 3, "category": "examples", "is_index": true}
  ]
}"#;

const PAGES: &[(&str, &str)] = &[
    ("using-k6/_index.md", "# Using k6\n\nCore concepts.\n"),
    (
        "using-k6/checks.md",
        "---\ntitle: Checks\n---\n\n# Checks\n\nChecks validate boolean conditions in k6 <K6_VERSION>.\n",
    ),
    (
        "using-k6/scenarios/_index.md",
        "# Scenarios\n\nSee [Checks](https://grafana.com/docs/k6/<K6_VERSION>/using-k6/checks) and \
         [Install](https://grafana.com/docs/k6/<K6_VERSION>/set-up/install-k6).\n",
    ),
    ("javascript-api/_index.md", "# JavaScript API\n"),
    ("javascript-api/k6-http/_index.md", "# k6/http\n\nMake HTTP requests.\n"),
    (
        "javascript-api/k6-http/get.md",
        "# get( url, [params] )\n\n{{< code >}}\n\n```javascript\nhttp.get('https://quickpizza.grafana.com');\n```\n\n{{< /code >}}\n",
    ),
    ("javascript-api/k6-http/post.md", "# post( url, [body], [params] )\n"),
    ("javascript-api/k6-browser/_index.md", "# k6/browser\n"),
    ("javascript-api/k6-browser/closecontext.md", "# CloseContext\n\nUses a threshold internally.\n"),
];

/// Write the fixture bundle into a fresh temporary directory.
pub fn bundle() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::write(root.join(k6docs_core::MANIFEST_FILE), MANIFEST)?;
    for (rel, content) in PAGES {
        let path = root.join("markdown").join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    fs::write(
        root.join("best_practices.md"),
        "---\ntitle: Best Practices\n---\n# k6 Best Practices\n\nWritten for <K6_VERSION>.\n",
    )?;
    Ok(dir)
}

/// Fixture bundle loaded as a session.
pub fn session() -> Result<(TempDir, Session)> {
    let dir = bundle()?;
    let session = Session::load("v1.5.x".to_string(), dir.path().to_path_buf())?;
    Ok((dir, session))
}

/// Run `f` against an in-memory writer and return what it wrote.
pub fn capture(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<String> {
    let mut out = Vec::new();
    f(&mut out)?;
    Ok(String::from_utf8(out)?)
}
