use indexmap::IndexMap;
use quickopen_core::SearchResult;
use serde::Deserialize;

use crate::{FailureKind, QueryError};

/// JSON body of the quick-open endpoint.
#[derive(Debug, Deserialize)]
struct QuickOpenResponse {
    /// File names binned by parent directory, in server order.
    contents: IndexMap<String, Vec<String>>,
    #[serde(rename = "scanSeconds", alias = "scan_seconds", default)]
    scan_seconds: f64,
}

/// Decodes a response body, keeping category and filename order.
pub fn decode_response(body: &[u8]) -> Result<SearchResult, QueryError> {
    let response: QuickOpenResponse = serde_json::from_slice(body)
        .map_err(|err| QueryError::new(FailureKind::Parse, err.to_string()))?;
    Ok(SearchResult::from_categories(
        response.contents,
        response.scan_seconds,
    ))
}
