use std::time::Duration;

use anyhow::Result;

use crate::extract::Whitelist;
use crate::fetch::HttpFetcher;
use crate::record::{ProductSelectors, RecordExtractor};
use crate::types::FetcherKind;
use crate::webdriver::{BrowserOptions, BrowserType};

/// Desktop Chrome user agent; the default headless one is served a bot check page
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.150 Safari/537.36";

/// Pause between consecutive page fetches
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a scrape run needs to know, gathered from the command line
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub fetcher: FetcherKind,
    pub browser: BrowserType,
    pub headless: bool,
    pub delay: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    pub selectors: ProductSelectors,
    pub whitelist: Whitelist,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            fetcher: FetcherKind::Http,
            browser: BrowserType::Chrome,
            headless: true,
            delay: DEFAULT_DELAY,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            selectors: ProductSelectors::default(),
            whitelist: Whitelist::default(),
        }
    }
}

impl ScrapeConfig {
    pub fn http_fetcher(&self) -> Result<HttpFetcher> {
        HttpFetcher::new(&self.user_agent, self.timeout)
    }

    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            browser_type: self.browser,
            headless: self.headless,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn extractor(&self) -> Result<RecordExtractor> {
        RecordExtractor::new(&self.selectors, self.whitelist.clone())
    }
}
