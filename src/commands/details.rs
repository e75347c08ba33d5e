use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use camscrape::files::{self, output_error};
use camscrape::{BrowserFetcher, FetcherKind, OutputFormat, RecordBuilder, ScrapeConfig};

/// Scrape every URL listed in `urls_file` and write the merged records
pub async fn handle_details(
    urls_file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: ScrapeConfig,
) -> Result<()> {
    // Fatal before any page is fetched
    let urls = files::read_urls(&urls_file)?;
    info!("Read {} URLs from {}", urls.len(), urls_file.display());

    let extractor = config.extractor()?;
    let records = match config.fetcher {
        FetcherKind::Http => {
            let builder = RecordBuilder::new(config.http_fetcher()?, extractor);
            builder.build_all(&urls, config.delay).await
        }
        FetcherKind::Browser => {
            let fetcher = BrowserFetcher::launch(&config.browser_options()).await?;
            let builder = RecordBuilder::new(fetcher, extractor);
            builder.build_all(&urls, config.delay).await
        }
    };

    let sink = files::open_sink(output.as_deref())?;
    files::write_records(&records, format, sink).map_err(|e| {
        output_error(output.clone().unwrap_or_else(|| PathBuf::from("<stdout>")), e)
    })?;

    Ok(())
}
