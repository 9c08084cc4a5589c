/// One remote lookup, built fresh from settings and browse path per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Directory to search under, relative to the server root. Empty means root.
    pub base_path: String,
    pub exclude_names: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub max_results: u32,
    /// Sent verbatim; whitespace is significant to the index.
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    pub label: String,
    pub filenames: Vec<String>,
}

/// Categorized listing returned by the index.
///
/// Category labels are unique. Both category order and filename order are
/// the server's and are kept as received.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    categories: Vec<CategoryListing>,
    pub scan_seconds: f64,
}

impl SearchResult {
    pub fn new(scan_seconds: f64) -> Self {
        Self {
            categories: Vec::new(),
            scan_seconds,
        }
    }

    /// Builds a result from `(label, filenames)` pairs in server order.
    pub fn from_categories<I, L, F>(categories: I, scan_seconds: f64) -> Self
    where
        I: IntoIterator<Item = (L, Vec<F>)>,
        L: Into<String>,
        F: Into<String>,
    {
        let mut result = Self::new(scan_seconds);
        for (label, filenames) in categories {
            result.push_category(label, filenames.into_iter().map(Into::into).collect());
        }
        result
    }

    /// Appends a category. A repeated label extends the existing category in place.
    pub fn push_category(&mut self, label: impl Into<String>, filenames: Vec<String>) {
        let label = label.into();
        match self.categories.iter_mut().find(|c| c.label == label) {
            Some(existing) => existing.filenames.extend(filenames),
            None => self.categories.push(CategoryListing { label, filenames }),
        }
    }

    pub fn categories(&self) -> &[CategoryListing] {
        &self.categories
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.filenames.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
