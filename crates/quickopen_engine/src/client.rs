use std::time::Duration;

use futures_util::StreamExt;
use quickopen_core::{SearchQuery, SearchResult};
use reqwest::header::AUTHORIZATION;
use url::Url;

use crate::wire::decode_response;
use crate::{FailureKind, QueryError};

/// Endpoint path, relative to the server base URL.
pub const QUICKOPEN_ENDPOINT: &str = "api/quickopen";

/// Longest slice of an error body kept for diagnostics.
const ERROR_BODY_PREVIEW_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Server base URL, e.g. `http://localhost:8888/`.
    pub base_url: String,
    /// Sent as `Authorization: token <token>` when set.
    pub token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888/".to_string(),
            token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// One remote lookup per call. No retries, no caching.
#[async_trait::async_trait]
pub trait QueryClient: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<SearchResult, QueryError>;
}

/// Builds the GET URL for `query` under `base_url`.
///
/// Every parameter is form-encoded; the keyword is passed through verbatim,
/// surrounding whitespace included.
pub fn build_request_url(base_url: &str, query: &SearchQuery) -> Result<Url, QueryError> {
    let mut base = Url::parse(base_url)
        .map_err(|err| QueryError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut url = base
        .join(QUICKOPEN_ENDPOINT)
        .map_err(|err| QueryError::new(FailureKind::InvalidUrl, err.to_string()))?;

    {
        let mut pairs = url.query_pairs_mut();
        for name in &query.exclude_names {
            pairs.append_pair("excludes", name);
        }
        for path in &query.exclude_paths {
            pairs.append_pair("exclude_paths", path);
        }
        pairs.append_pair("path", &query.base_path);
        pairs.append_pair("max_load", &query.max_results.to_string());
        pairs.append_pair("keyword", &query.keyword);
    }
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestQueryClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestQueryClient {
    pub fn new(settings: ClientSettings) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| QueryError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, QueryError> {
        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(QueryError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(QueryError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl QueryClient for ReqwestQueryClient {
    async fn fetch(&self, query: &SearchQuery) -> Result<SearchResult, QueryError> {
        let url = build_request_url(&self.settings.base_url, query)?;
        let mut request = self.client.get(url);
        if let Some(token) = &self.settings.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            let message = if preview.is_empty() {
                status.to_string()
            } else {
                format!("{status}: {preview}")
            };
            return Err(QueryError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = self.read_body(response).await?;
        decode_response(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> QueryError {
    if err.is_timeout() {
        return QueryError::new(FailureKind::Timeout, err.to_string());
    }
    QueryError::new(FailureKind::Network, err.to_string())
}
