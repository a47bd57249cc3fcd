//! Content fetching from URLs, files, and stdin.
//!
//! [`fetch_page`] is the one network call an extraction makes. Status codes
//! are recorded but never treated as failures: an error page with an HTML
//! body goes through the pipeline like any other page.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::{PageZenError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; PageZen/1.0)".to_string() }
    }
}

/// A downloaded page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Decoded response body.
    pub body: String,
    /// Location after redirects; relative references resolve against it.
    pub final_url: Url,
    pub status: StatusCode,
}

/// Builds the shared HTTP client.
///
/// Redirects are followed and the connection pool is reused across calls.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(PageZenError::HttpError)
}

/// Parses `url` and checks that it is an absolute `http`/`https` URL.
pub fn parse_page_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| PageZenError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        _ => Err(PageZenError::InvalidUrl(format!(
            "{}: URL must use http:// or https:// and include a host",
            url
        ))),
    }
}

/// Fetches `url` with a GET request and decodes the body as text.
///
/// Transport failures map to [`PageZenError::HttpError`], an elapsed timeout
/// to [`PageZenError::Timeout`], and a body that cannot be decoded to
/// [`PageZenError::HtmlParseError`].
pub async fn fetch_page(client: &Client, url: &str, config: &FetchConfig) -> Result<FetchedPage> {
    let parsed_url = parse_page_url(url)?;

    let response = client
        .get(parsed_url)
        .timeout(Duration::from_secs(config.timeout))
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| timeout_or_http(e, config.timeout))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "Fetched page returned non-success status");
    }

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            PageZenError::Timeout { timeout: config.timeout }
        } else {
            PageZenError::HtmlParseError(format!("failed to read response body: {}", e))
        }
    })?;

    tracing::info!(
        url = %url,
        final_url = %final_url,
        status = status.as_u16(),
        bytes = body.len(),
        "Fetched page"
    );

    Ok(FetchedPage { body, final_url, status })
}

fn timeout_or_http(e: reqwest::Error, timeout: u64) -> PageZenError {
    if e.is_timeout() { PageZenError::Timeout { timeout } } else { PageZenError::HttpError(e) }
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(PageZenError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(|source| PageZenError::ReadError { path: path.to_string(), source })
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|source| PageZenError::ReadError { path: "stdin".to_string(), source })?;

    Ok(buffer)
}
