//! # k6docs-core
//!
//! Core functionality for k6docs - a local, offline browser for the k6
//! documentation.
//!
//! A prepared bundle holds a section manifest (`sections.json`) and the
//! markdown for each page. This crate loads the manifest into a
//! [`SectionIndex`], turns free-form topic words into slugs with
//! [`SlugResolver`], cleans Hugo-specific markup out of pages with
//! [`ContentTransformer`] and searches sections with [`search`].
//!
//! ## Architecture
//!
//! - **Index**: immutable slug lookup, children by weight, top-level categories
//! - **Resolution**: explicit paths, category prefixes and module shorthands
//! - **Transform**: ordered markdown rewrites, split into prepare and view phases
//! - **Search**: exact and separator-insensitive matching
//! - **Storage / Bundle**: reading and building the on-disk bundle
//! - **Configuration**: optional `config.toml` with renderer, version and cache root
//!
//! ## Quick Start
//!
//! ```rust
//! use k6docs_core::{SectionIndex, SlugResolver, ContentTransformer};
//!
//! let index = SectionIndex::from_json(br#"{"version": "v1.5.x", "sections": [
//!     {"slug": "javascript-api/k6-http/get", "title": "get( url, [params] )"}
//! ]}"#)?;
//!
//! let slug = SlugResolver::default()
//!     .resolve_with_lookup(&["http", "get"], Some(&|s: &str| index.contains(s)));
//! let section = index.get(&slug)?;
//! assert_eq!(section.title, "get( url, [params] )");
//!
//! let page = ContentTransformer::default().transform("Since <K6_VERSION>.", index.version());
//! assert_eq!(page, "Since v1.5.x.");
//! # Ok::<(), k6docs_core::Error>(())
//! ```
//!
//! ## Thread safety
//!
//! A [`SectionIndex`] is never mutated after construction and can be shared
//! across threads for concurrent reads. The resolver and transformer hold only
//! configuration.

/// Bundle preparation from a k6-docs checkout
pub mod bundle;
/// Shipped documentation categories
pub mod categories;
/// Configuration file loading
pub mod config;
/// Error types and result aliases
pub mod error;
/// Section index
pub mod index;
/// Topic resolution
pub mod resolve;
/// Section search
pub mod search;
/// On-disk bundle access
pub mod storage;
/// Markdown rewriting
pub mod transform;
/// Core data types
pub mod types;
/// Docs version mapping and detection
pub mod version;

pub use bundle::{BundleBuilder, PrepareReport};
pub use categories::{Category, CategorySet};
pub use config::Config;
pub use error::{Error, Result};
pub use index::{MANIFEST_FILE, SectionIndex};
pub use resolve::SlugResolver;
pub use search::search;
pub use storage::{DocsCache, default_cache_dir, is_cached};
pub use transform::{ContentTransformer, strip_frontmatter};
pub use types::{Manifest, Section};
pub use version::{detect_k6_version, map_to_wildcard, parse_k6_version_output};
