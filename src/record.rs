use std::time::Duration;

use anyhow::Result;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::extract::{
    FieldNormalizer, SpecBlockLocator, SpecLineParser, Whitelist, compile_selector, rendered_text,
};
use crate::fetch::PageFetcher;
use crate::types::{PageContent, Record};

/// Label some themes render in front of the price
pub const SALE_PRICE_LABEL: &str = "Sale price";

/// CSS selectors for the fixed product fields of a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSelectors {
    pub product_name: String,
    pub price: String,
    pub stock_status: String,
}

impl Default for ProductSelectors {
    fn default() -> Self {
        ProductSelectors {
            product_name: ".product-meta__title".to_string(),
            price: ".price".to_string(),
            stock_status: ".product-form__inventory".to_string(),
        }
    }
}

/// Turns fetched page content into a [`Record`]. Holds no per-page state.
pub struct RecordExtractor {
    product_name: Selector,
    price: Selector,
    stock_status: Selector,
    locator: SpecBlockLocator,
    parser: SpecLineParser,
    normalizer: FieldNormalizer,
}

impl RecordExtractor {
    pub fn new(selectors: &ProductSelectors, whitelist: Whitelist) -> Result<Self> {
        Ok(Self {
            product_name: compile_selector(&selectors.product_name)?,
            price: compile_selector(&selectors.price)?,
            stock_status: compile_selector(&selectors.stock_status)?,
            locator: SpecBlockLocator::new()?,
            parser: SpecLineParser::new()?,
            normalizer: FieldNormalizer::new(whitelist),
        })
    }

    /// Extract every field from one page. Missing elements leave their
    /// field out; a page without a specifications block gets empty specs.
    pub fn extract(&self, url: &str, page: &PageContent) -> Record {
        let document = Html::parse_document(&page.html);

        let specs = match self.locator.locate(&document) {
            Some(block) => self
                .normalizer
                .normalize(self.parser.parse(block.content, page.origin)),
            None => {
                debug!("No specifications block on {}", url);
                Default::default()
            }
        };

        Record {
            url: url.to_string(),
            product_name: first_text(&document, &self.product_name),
            price: first_text(&document, &self.price).map(|price| strip_sale_label(&price)),
            stock_status: first_text(&document, &self.stock_status),
            specs,
        }
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(rendered_text)
}

fn strip_sale_label(price: &str) -> String {
    price
        .strip_prefix(SALE_PRICE_LABEL)
        .unwrap_or(price)
        .trim()
        .to_string()
}

/// Fetches detail pages and builds one record per URL
pub struct RecordBuilder<F> {
    fetcher: F,
    extractor: RecordExtractor,
}

impl<F: PageFetcher> RecordBuilder<F> {
    pub fn new(fetcher: F, extractor: RecordExtractor) -> Self {
        Self { fetcher, extractor }
    }

    /// Build the record for one URL. A failed fetch yields a record that
    /// holds only the URL.
    pub async fn build(&self, url: &str) -> Record {
        info!("Scraping {}", url);
        match self.fetcher.fetch(url).await {
            Ok(page) => self.extractor.extract(url, &page),
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                Record::bare(url)
            }
        }
    }

    /// Build records for every URL in order, pausing `delay` between
    /// consecutive fetches, then close the fetcher.
    pub async fn build_all(self, urls: &[String], delay: Duration) -> Vec<Record> {
        let mut records = Vec::with_capacity(urls.len());

        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            records.push(self.build(url).await);
        }

        if let Err(e) = self.fetcher.close().await {
            warn!("Failed to close page fetcher: {:#}", e);
        }

        info!("Scraped {} pages", records.len());
        records
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
