//! Turn free-form CLI topic words into a canonical section slug.
//!
//! Three rules are tried in order, first match wins:
//!
//! 1. any word containing `/` means the joined words already are the slug
//! 2. a first word naming a known category is joined as-is
//! 3. otherwise the first word is a module shorthand under the API category
//!
//! Source pages are named inconsistently (some modules carry the `k6-` prefix,
//! some do not, some children repeat their parent's name), so rule 3 can
//! consult the index to pick between candidates. Resolution never fails; the
//! worst case is a plausible slug that the caller then reports as not found.

use crate::CategorySet;

/// Category under which module shorthands are resolved.
pub const DEFAULT_API_CATEGORY: &str = "javascript-api";

/// Prefix carried by most module slugs.
pub const DEFAULT_MODULE_PREFIX: &str = "k6-";

/// Existence check used to disambiguate candidate slugs.
pub type ExistsFn<'a> = &'a dyn Fn(&str) -> bool;

/// Converts CLI words into slugs.
#[derive(Debug, Clone)]
pub struct SlugResolver {
    categories: CategorySet,
    api_category: String,
    module_prefix: String,
}

impl SlugResolver {
    /// Create a resolver for the given category set and the k6 API layout.
    pub fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            api_category: DEFAULT_API_CATEGORY.to_string(),
            module_prefix: DEFAULT_MODULE_PREFIX.to_string(),
        }
    }

    /// Override the category that module shorthands resolve under.
    #[must_use]
    pub fn with_api_category(mut self, category: impl Into<String>) -> Self {
        self.api_category = category.into();
        self
    }

    /// Override the shorthand prefix (case-sensitive literal).
    #[must_use]
    pub fn with_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_prefix = prefix.into();
        self
    }

    /// Resolve without an index; rule 3 always yields the prefixed form.
    ///
    /// ```rust
    /// use k6docs_core::SlugResolver;
    ///
    /// let resolver = SlugResolver::default();
    /// assert_eq!(resolver.resolve(&["http", "get"]), "javascript-api/k6-http/get");
    /// assert_eq!(resolver.resolve(&["k6-http", "get"]), "javascript-api/k6-http/get");
    /// assert_eq!(resolver.resolve(&["using-k6", "scenarios"]), "using-k6/scenarios");
    /// assert_eq!(resolver.resolve(&["a/b/c"]), "a/b/c");
    /// assert_eq!(resolver.resolve::<&str>(&[]), "");
    /// ```
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> String {
        self.resolve_with_lookup(args, None)
    }

    /// Resolve, using `exists` to choose between prefixed and bare module slugs.
    ///
    /// With a lookup, a bare module name prefers the unprefixed slug
    /// (`javascript-api/jslib`) over the prefixed one (`javascript-api/k6-jslib`).
    /// When neither exists, a child slug that repeats its parent's name
    /// (`cookiejar/cookiejar-clear`) is tried before falling back to the
    /// prefixed candidate. Returns an empty string for empty input.
    pub fn resolve_with_lookup<S: AsRef<str>>(&self, args: &[S], exists: Option<ExistsFn<'_>>) -> String {
        let words: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let Some((&first, rest)) = words.split_first() else {
            return String::new();
        };

        // Rule 1: explicit path.
        if words.iter().any(|w| w.contains('/')) {
            return words.join("/");
        }

        // Rule 2: known category prefix.
        if self.categories.contains(first) {
            return words.join("/");
        }

        // Rule 3: module shortcut.
        let typed_prefix = first.starts_with(&self.module_prefix);
        let name = first.strip_prefix(&self.module_prefix).unwrap_or(first);

        let mut parts = Vec::with_capacity(words.len());
        parts.push(name);
        parts.extend_from_slice(rest);
        let tail = parts.join("/");

        let prefixed = format!("{}/{}{}", self.api_category, self.module_prefix, tail);

        let exists = match exists {
            Some(exists) if !typed_prefix => exists,
            _ => return prefixed,
        };

        let unprefixed = format!("{}/{}", self.api_category, tail);
        if exists(&unprefixed) {
            return unprefixed;
        }
        if exists(&prefixed) {
            return prefixed;
        }

        with_parent_prefix(&prefixed, exists).unwrap_or(prefixed)
    }
}

impl Default for SlugResolver {
    fn default() -> Self {
        Self::new(CategorySet::k6())
    }
}

/// Retry `slug` with the parent segment's name repeated on the last segment.
fn with_parent_prefix(slug: &str, exists: ExistsFn<'_>) -> Option<String> {
    let (parent, child) = slug.rsplit_once('/')?;
    let parent_name = parent.rsplit('/').next().unwrap_or(parent);

    if child.starts_with(&format!("{parent_name}-")) {
        return None;
    }

    let candidate = format!("{parent}/{parent_name}-{child}");
    exists(&candidate).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    fn resolver() -> SlugResolver {
        SlugResolver::default()
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(resolver().resolve(&empty), "");
        assert_eq!(resolver().resolve_with_lookup(&empty, Some(&|_: &str| true)), "");
    }

    #[test]
    fn test_rule_precedence_without_lookup() {
        let cases: &[(&[&str], &str)] = &[
            // explicit path
            (&["javascript-api/k6-http/get"], "javascript-api/k6-http/get"),
            (&["http", "cookiejar/clear"], "http/cookiejar/clear"),
            // known category
            (&["using-k6", "scenarios"], "using-k6/scenarios"),
            (&["using-k6", "k6-options", "reference"], "using-k6/k6-options/reference"),
            (&["examples", "websockets"], "examples/websockets"),
            (&["testing-guides", "test-types"], "testing-guides/test-types"),
            (&["using-k6"], "using-k6"),
            (&["javascript-api"], "javascript-api"),
            (&["using-k6-browser", "overview"], "using-k6-browser/overview"),
            (&["results-output", "grafana-cloud"], "results-output/grafana-cloud"),
            (&["reference", "glossary"], "reference/glossary"),
            // module shortcut
            (&["http", "get"], "javascript-api/k6-http/get"),
            (&["browser", "page", "click"], "javascript-api/k6-browser/page/click"),
            (&["metrics"], "javascript-api/k6-metrics"),
            (&["ws"], "javascript-api/k6-ws"),
            // prefix typed by the user is not doubled
            (&["k6-http", "get"], "javascript-api/k6-http/get"),
            (&["k6-metrics"], "javascript-api/k6-metrics"),
        ];
        for (args, want) in cases {
            assert_eq!(resolver().resolve(args), *want, "args {args:?}");
        }
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        assert_eq!(resolver().resolve(&["Using-K6"]), "javascript-api/k6-Using-K6");
    }

    #[test]
    fn test_prefix_dedup_equivalence() {
        let r = resolver();
        assert_eq!(r.resolve(&["k6-http", "get"]), r.resolve(&["http", "get"]));
    }

    #[test]
    fn test_lookup_prefers_unprefixed() {
        // Given: an index that has javascript-api/jslib but not k6-jslib
        let known: HashSet<&str> = ["javascript-api/jslib", "javascript-api/k6-http"].into();
        let exists = |s: &str| known.contains(s);

        // Then: bare names pick whichever form exists
        assert_eq!(resolver().resolve_with_lookup(&["jslib"], Some(&exists)), "javascript-api/jslib");
        assert_eq!(resolver().resolve_with_lookup(&["http"], Some(&exists)), "javascript-api/k6-http");
    }

    #[test]
    fn test_typed_prefix_skips_lookup() {
        let calls = RefCell::new(0);
        let exists = |_: &str| {
            *calls.borrow_mut() += 1;
            true
        };
        let slug = resolver().resolve_with_lookup(&["k6-crypto"], Some(&exists));
        assert_eq!(slug, "javascript-api/k6-crypto");
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_parent_prefix_repair() {
        // Given: a child slug that repeats its parent's name
        let known: HashSet<&str> = ["javascript-api/k6-http/cookiejar/cookiejar-clear"].into();
        let exists = |s: &str| known.contains(s);

        // When: the user types the short child name
        let slug = resolver().resolve_with_lookup(&["http", "cookiejar", "clear"], Some(&exists));

        // Then: the repaired slug is returned
        assert_eq!(slug, "javascript-api/k6-http/cookiejar/cookiejar-clear");
    }

    #[test]
    fn test_parent_prefix_not_doubled() {
        let tried = RefCell::new(Vec::new());
        let exists = |s: &str| {
            tried.borrow_mut().push(s.to_string());
            false
        };
        let slug = resolver().resolve_with_lookup(&["http", "cookiejar", "cookiejar-clear"], Some(&exists));
        assert_eq!(slug, "javascript-api/k6-http/cookiejar/cookiejar-clear");
        assert!(
            !tried
                .borrow()
                .iter()
                .any(|s| s.ends_with("cookiejar-cookiejar-clear"))
        );
    }

    #[test]
    fn test_unknown_falls_back_to_prefixed() {
        let exists = |_: &str| false;
        assert_eq!(
            resolver().resolve_with_lookup(&["nothing", "here"], Some(&exists)),
            "javascript-api/k6-nothing/here"
        );
    }

    #[test]
    fn test_custom_layout() {
        let r = SlugResolver::new(CategorySet::new([crate::Category::new("guides")]))
            .with_api_category("api")
            .with_module_prefix("mod-");
        assert_eq!(r.resolve(&["guides", "intro"]), "guides/intro");
        assert_eq!(r.resolve(&["mod-fs", "open"]), "api/mod-fs/open");
        assert_eq!(r.resolve(&["fs", "open"]), "api/mod-fs/open");
    }

    proptest! {
        #[test]
        fn test_resolve_is_deterministic(args in proptest::collection::vec("[a-z0-9-]{1,8}", 0..5)) {
            let r = resolver();
            prop_assert_eq!(r.resolve(&args), r.resolve(&args));
        }

        #[test]
        fn test_slash_input_is_joined_verbatim(
            head in "[a-z0-9-]{1,8}",
            tail in proptest::collection::vec("[a-z0-9-]{1,8}", 1..4),
            extra in proptest::collection::vec("[a-z0-9-]{1,8}", 0..3),
        ) {
            let mut args = vec![format!("{head}/{}", tail.join("/"))];
            args.extend(extra);
            let always = |_: &str| true;
            prop_assert_eq!(resolver().resolve_with_lookup(&args, Some(&always)), args.join("/"));
        }
    }
}
