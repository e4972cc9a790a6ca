//! Blocking HTTP access shared by every provider.
//!
//! Providers only ever need "GET this URL, give me the body as text", so that
//! is the whole seam. Tests swap in canned bodies through [`HttpFetch`].

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{AppError, FetchError};

/// Some upstream pages reject non-browser clients outright.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub trait HttpFetch {
    /// GET `url` and return the body. Non-success statuses are errors.
    fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

pub struct BlockingHttp {
    client: Client,
}

impl BlockingHttp {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// The underlying client, for callers that need to POST.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl HttpFetch for BlockingHttp {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::unreachable(url, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::unreachable(url, format!("HTTP {status}")));
        }

        resp.text()
            .map_err(|e| FetchError::unreachable(url, format!("failed to read body: {e}")))
    }
}
