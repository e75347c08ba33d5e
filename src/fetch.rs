use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::errors::FetchError;
use crate::types::{PageContent, PageOrigin};

/// Capability to turn a URL into page content.
///
/// Implementations decide how the page is obtained (plain HTTP, a real
/// browser, canned fixtures in tests); the extraction pipeline only sees
/// the resulting [`PageContent`].
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetch one page
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;

    /// Release whatever the fetcher holds (browser session, driver process)
    async fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Fetches raw HTML with a plain HTTP GET
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!("GET {}", parsed);
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(PageContent::new(html, PageOrigin::Static))
    }
}
