use std::env;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};
use url::Url;

use super::extract::extract_records;
use super::types::{ApiError, SearchResponse};
use super::{FetchParams, ResultCollection};

const API_BASE: &str = "https://ruscorpora.ru/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("corpus rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("corpus API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid corpus URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("malformed corpus response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Source of usage examples.
/// Implemented by `HttpCorpusClient` for production; mock implementations used in tests.
pub trait CorpusClient {
    /// Fetches `params.pages` pages of examples for `word`.
    ///
    /// Fails with `CorpusError::InvalidRequest` when the corpus cannot serve
    /// that many pages. A word with no matches yields an empty collection.
    async fn fetch(
        &self,
        word: &str,
        params: &FetchParams,
    ) -> Result<ResultCollection, CorpusError>;
}

#[derive(Clone)]
pub struct HttpCorpusClient {
    http: Client,
    base_url: String,
}

impl HttpCorpusClient {
    /// Base URL from `CORPEX_API_URL`, falling back to the public corpus API.
    pub fn from_env(http: Client) -> Self {
        let base_url = env::var("CORPEX_API_URL")
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| API_BASE.to_string());
        debug!(base_url = %base_url, "corpus client configured");
        Self { http, base_url }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    fn page_url(&self, word: &str, params: &FetchParams, page: u32) -> Result<Url, CorpusError> {
        let mut url = Url::parse(&format!("{}/search", self.base_url.trim_end_matches('/')))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("req", word)
                .append_pair("mode", params.variant.mode())
                .append_pair("p", &page.to_string())
                .append_pair("dpp", &params.examples_per_page.to_string())
                .append_pair("sort", params.sort.as_str());
            if let Some(lang) = params.language {
                query.append_pair("lang", lang.code());
            }
        }
        Ok(url)
    }

    async fn request_page(&self, url: &Url) -> Result<SearchResponse, CorpusError> {
        let response = self
            .http
            .get(url.clone())
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("corpus API rate limited");
            return Err(CorpusError::RateLimited);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response.bytes().await?;
        let text = decode_body(&bytes, content_type.as_deref());

        if !status.is_success() {
            if let Ok(body) = serde_json::from_str::<SearchResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(err, status.as_u16());
                warn!(error = %classified, "corpus API error");
                return Err(classified);
            }
            let snippet: String = text.chars().take(200).collect();
            warn!(status = %status, "corpus API error (no structured body)");
            return Err(classify_api_error(
                &ApiError {
                    code: Some(status.as_u16()),
                    message: Some(format!("HTTP {status}: {snippet}")),
                },
                status.as_u16(),
            ));
        }

        let body: SearchResponse = serde_json::from_str(&text)?;
        if let Some(err) = &body.error {
            let classified = classify_api_error(err, status.as_u16());
            warn!(error = %classified, "corpus API error in 200 response");
            return Err(classified);
        }

        Ok(body)
    }

    async fn request_page_with_retry(&self, url: &Url) -> Result<SearchResponse, CorpusError> {
        let mut last_err = None;
        for attempt in 0..MAX_RETRIES {
            match self.request_page(url).await {
                Ok(response) => return Ok(response),
                Err(e) if is_retriable(&e) => {
                    last_err = Some(e);
                    if attempt + 1 < MAX_RETRIES {
                        let delay_ms = jittered_backoff(attempt);
                        debug!(
                            attempt = attempt + 1,
                            delay_ms, "retrying after transient error"
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or(CorpusError::RateLimited))
    }
}

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;

impl CorpusClient for HttpCorpusClient {
    async fn fetch(
        &self,
        word: &str,
        params: &FetchParams,
    ) -> Result<ResultCollection, CorpusError> {
        let first = self
            .request_page_with_retry(&self.page_url(word, params, 0)?)
            .await?;

        let available = first.total_pages;
        if available == 0 {
            debug!(word, "no examples found");
            return Ok(Vec::new());
        }
        if params.pages > available {
            return Err(CorpusError::InvalidRequest(format!(
                "requested {} pages, corpus serves {available}",
                params.pages
            )));
        }

        let mut records = extract_records(first, params.marker);
        for page in 1..params.pages {
            let response = self
                .request_page_with_retry(&self.page_url(word, params, page)?)
                .await?;
            records.extend(extract_records(response, params.marker));
        }

        debug!(
            word,
            pages = params.pages,
            records = records.len(),
            "corpus fetch complete"
        );
        Ok(records)
    }
}

fn is_retriable(e: &CorpusError) -> bool {
    matches!(
        e,
        CorpusError::RateLimited
            | CorpusError::Api {
                code: 500..=599,
                ..
            }
    )
}

/// Equal jitter backoff: base/2 + rand(0, base/2).
fn jittered_backoff(attempt: u32) -> u64 {
    let base = INITIAL_BACKOFF_MS * 2u64.pow(attempt);
    let half = base / 2;
    half + fastrand::u64(..half.max(1))
}

fn classify_api_error(err: &ApiError, status: u16) -> CorpusError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match err.code.unwrap_or(status) {
        400 | 422 => CorpusError::InvalidRequest(message),
        429 => CorpusError::RateLimited,
        code => CorpusError::Api { code, message },
    }
}

/// Decodes a response body using the `charset` of its content type, UTF-8 otherwise.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(|ct| {
            ct.split(';').find_map(|param| {
                let (key, value) = param.split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("charset")
                    .then(|| value.trim().trim_matches('"'))
            })
        })
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = actual.name(), "corpus response contains undecodable bytes");
    }
    text.into_owned()
}
