use std::path::PathBuf;

use anyhow::Result;

use camscrape::files::{self, output_error};
use camscrape::{BrowserFetcher, FetcherKind, LinkCollector, PageFetcher, ScrapeConfig};

/// Collect product links from the listing pages starting at `url`
pub async fn handle_links(
    url: String,
    max_links: usize,
    link_selector: String,
    output: Option<PathBuf>,
    config: ScrapeConfig,
) -> Result<()> {
    let collector = LinkCollector::new(&link_selector)?;

    let links = match config.fetcher {
        FetcherKind::Http => {
            let fetcher = config.http_fetcher()?;
            collector
                .collect(&fetcher, &url, max_links, config.delay)
                .await?
        }
        FetcherKind::Browser => {
            let fetcher = BrowserFetcher::launch(&config.browser_options()).await?;
            let links = collector
                .collect(&fetcher, &url, max_links, config.delay)
                .await;
            fetcher.close().await?;
            links?
        }
    };

    let sink = files::open_sink(output.as_deref())?;
    files::write_lines(&links, sink).map_err(|e| {
        output_error(output.clone().unwrap_or_else(|| PathBuf::from("<stdout>")), e)
    })?;

    Ok(())
}
