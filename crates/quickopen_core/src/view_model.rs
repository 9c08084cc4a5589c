use crate::{SearchPhase, SearchResult};

/// Identifier under which an entry is registered and later activated.
pub fn activation_id(category: &str, filename: &str) -> String {
    format!("{category}/{filename}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub category: String,
    pub label: String,
    pub activation_id: String,
}

impl ViewEntry {
    pub fn new(category: impl Into<String>, filename: impl Into<String>) -> Self {
        let category = category.into();
        let label = filename.into();
        let activation_id = activation_id(&category, &label);
        Self {
            category,
            label,
            activation_id,
        }
    }

    /// Flattens a result into entries, categories and filenames in server order.
    pub fn from_result(result: &SearchResult) -> Vec<Self> {
        result
            .categories()
            .iter()
            .flat_map(|category| {
                category
                    .filenames
                    .iter()
                    .map(move |filename| Self::new(category.label.clone(), filename.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: SearchPhase,
    pub input: String,
    /// Keyword of the result currently shown; `None` before the first success.
    pub rendered_keyword: Option<String>,
    pub entries: Vec<ViewEntry>,
    pub scan_seconds: Option<f64>,
    pub last_error: Option<String>,
    pub queries_issued: u64,
    /// Set when `entries` changed since the last render.
    pub dirty: bool,
}
