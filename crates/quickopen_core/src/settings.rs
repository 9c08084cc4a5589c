use std::time::Duration;

/// Entry cap used when no explicit `max_load` is configured.
pub const DEFAULT_MAX_LOAD: u32 = 1000;

/// Name patterns excluded out of the box.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".ipynb_checkpoints",
    "node_modules",
    "__pycache__",
    ".#*",
    ".DS_Store",
];

/// User-facing options read on every issued query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickOpenSettings {
    /// Search under the current browse directory instead of the server root.
    pub relative_search: bool,
    pub excludes: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub max_load: u32,
}

impl Default for QuickOpenSettings {
    fn default() -> Self {
        Self {
            relative_search: false,
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            exclude_paths: Vec::new(),
            max_load: DEFAULT_MAX_LOAD,
        }
    }
}

/// Wait periods of the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorTiming {
    /// Floor between two issued queries, measured issue to issue.
    pub min_interval: Duration,
    /// How long a keyword must stay unchanged before it is queried.
    pub settle_delay: Duration,
}

impl Default for CoordinatorTiming {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(2000),
            settle_delay: Duration::from_millis(1000),
        }
    }
}
