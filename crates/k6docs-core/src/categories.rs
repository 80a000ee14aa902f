//! Top-level documentation categories shipped in a bundle.
//!
//! The set is explicit configuration rather than something derived from the
//! index: the slug resolver uses it to recognise category-qualified topics,
//! the transformer uses it to decide which documentation links can be
//! flattened, and bundle preparation uses it to filter source files.

/// A top-level documentation category and its inclusion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// First path segment, e.g. `using-k6`.
    pub name: String,
    /// The only second-level segments shipped for this category.
    ///
    /// Empty means every subpath is included.
    pub subcategories: Vec<String>,
}

impl Category {
    /// A category whose whole subtree is shipped.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subcategories: Vec::new(),
        }
    }

    /// Restrict the category to the given second-level segments.
    #[must_use]
    pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcategories = subcategories.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered set of shipped categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Build a set from explicit categories.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
        }
    }

    /// The categories the k6 documentation bundle ships.
    pub fn k6() -> Self {
        Self::new([
            Category::new("javascript-api"),
            Category::new("using-k6"),
            Category::new("using-k6-browser"),
            Category::new("testing-guides"),
            Category::new("examples"),
            Category::new("results-output"),
            Category::new("reference").with_subcategories(["glossary"]),
        ])
    }

    /// Exact, case-sensitive category-name membership.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Category names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Whether a documentation source path belongs in the bundle.
    ///
    /// Backslashes are treated as separators and surrounding slashes ignored.
    /// For categories restricted to subcategories the bare category is
    /// excluded, and the next segment must name an allowed subcategory
    /// (either as a directory or as `<name>.md`).
    ///
    /// ```rust
    /// use k6docs_core::CategorySet;
    ///
    /// let set = CategorySet::k6();
    /// assert!(set.is_included_path("using-k6/scenarios.md"));
    /// assert!(set.is_included_path("reference/glossary.md"));
    /// assert!(!set.is_included_path("reference/archive.md"));
    /// assert!(!set.is_included_path("extensions/explore.md"));
    /// ```
    pub fn is_included_path(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        let trimmed = normalized.trim_matches('/');
        if trimmed.is_empty() {
            return false;
        }

        let (category, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        let Some(cat) = self.categories.iter().find(|c| c.name == category) else {
            return false;
        };

        if cat.subcategories.is_empty() {
            return true;
        }
        if rest.is_empty() {
            return false;
        }

        let segment = rest.split('/').next().unwrap_or_default();
        cat.subcategories
            .iter()
            .any(|sub| segment == sub || segment.strip_suffix(".md") == Some(sub.as_str()))
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::k6()
    }
}
