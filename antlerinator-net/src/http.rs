use std::time::Duration;

use antlerinator_common::error::{AntlrError, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, error};

use crate::validation::validate_url;

pub const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT_STRING: &str = concat!("antlerinator/", env!("CARGO_PKG_VERSION"), " (Rust)");

/// Source of remote artifacts.
///
/// `get` returns the complete response body or fails; nothing is written to
/// disk by a transport.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTPS transport backed by a blocking `reqwest` client.
///
/// Certificates are validated by the TLS backend. No retry is attempted.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        validate_url(url)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().map_err(|e| {
            debug!("HTTP request failed for {url}: {e}");
            AntlrError::from(e)
        })?;
        let status = response.status();
        debug!("Received HTTP status: {} for {}", status, url);

        if !status.is_success() {
            error!("HTTP error {} for URL {}", status, url);
            let file_name = url.rsplit('/').next().unwrap_or(url).to_string();
            let reason = match status {
                StatusCode::NOT_FOUND => "Resource not found (404)".to_string(),
                StatusCode::FORBIDDEN => "Access forbidden (403)".to_string(),
                _ => format!("HTTP error {status}"),
            };
            return Err(AntlrError::DownloadError(file_name, url.to_string(), reason));
        }

        let content = response.bytes().map_err(AntlrError::from)?;
        debug!("Read {} bytes from {}", content.len(), url);
        Ok(content.to_vec())
    }
}

fn build_http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| AntlrError::HttpError(format!("Failed to build HTTP client: {e}")))
}
