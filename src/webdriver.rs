use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tracing::{debug, info};

use crate::errors::FetchError;
use crate::fetch::PageFetcher;
use crate::types::{PageContent, PageOrigin};
use crate::webdriver_manager::GLOBAL_WEBDRIVER_MANAGER;

/// Supported browser types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl BrowserType {
    /// Name of the WebDriver binary for this browser
    pub fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }
}

/// Options for launching the browser session
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub browser_type: BrowserType,
    pub headless: bool,
    pub user_agent: String,
}

/// Fetches pages through a real browser and returns the rendered DOM
pub struct BrowserFetcher {
    client: Client,
    browser_type: BrowserType,
    // Chrome's user data dir lives as long as the session
    _profile_dir: Option<tempfile::TempDir>,
}

impl BrowserFetcher {
    /// Start a browser session
    ///
    /// Ensures a WebDriver is running (starting one if needed) and opens a
    /// session with the configured user agent.
    pub async fn launch(options: &BrowserOptions) -> Result<Self> {
        let browser_type = options.browser_type;
        info!("Connecting to {:?} WebDriver", browser_type);

        let webdriver_url = GLOBAL_WEBDRIVER_MANAGER
            .ensure_driver(&browser_type)
            .await?;

        // Chrome refuses to share a profile directory between sessions
        let profile_dir = match browser_type {
            BrowserType::Chrome => Some(
                tempfile::Builder::new()
                    .prefix("camscrape-chrome-")
                    .tempdir()
                    .context("Failed to create Chrome profile directory")?,
            ),
            BrowserType::Firefox => None,
        };

        let mut caps = serde_json::Map::new();

        match browser_type {
            BrowserType::Firefox => {
                let mut args = Vec::new();
                if options.headless {
                    args.push("--headless".to_string());
                }

                caps.insert(
                    "moz:firefoxOptions".to_string(),
                    json!({
                        "args": args,
                        "prefs": { "general.useragent.override": options.user_agent },
                    }),
                );
            }
            BrowserType::Chrome => {
                let mut args = vec![
                    "--no-sandbox".to_string(),
                    "--disable-dev-shm-usage".to_string(),
                    format!("--user-agent={}", options.user_agent),
                ];

                if options.headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                }

                if let Some(dir) = &profile_dir {
                    args.push(format!("--user-data-dir={}", dir.path().display()));
                }

                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
        }

        debug!("Connecting to WebDriver at {}", webdriver_url);

        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(&webdriver_url)
            .await
            .context("Failed to connect to WebDriver")?;

        Ok(BrowserFetcher {
            client,
            browser_type,
            _profile_dir: profile_dir,
        })
    }

    /// Navigate and wait until the document reports it is fully loaded
    async fn goto(&self, url: &str) -> Result<(), FetchError> {
        info!("Navigating to {} with {:?}", url, self.browser_type);
        self.client.goto(url).await?;

        let wait_script = "return document.readyState === 'complete';";

        // Max 2 seconds
        for _ in 0..20 {
            match self.client.execute(wait_script, vec![]).await {
                Ok(val) if val.as_bool().unwrap_or(false) => break,
                _ => tokio::time::sleep(tokio::time::Duration::from_millis(100)).await,
            }
        }

        Ok(())
    }
}

impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        self.goto(url).await?;
        let html = self.client.source().await?;
        Ok(PageContent::new(html, PageOrigin::Rendered))
    }

    async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .context("Failed to close browser session")
    }
}
