//! Collects detail-page URLs from paginated listing pages.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::extract::compile_selector;
use crate::fetch::PageFetcher;

/// Class of the product title anchors on a listing page
pub const DEFAULT_LINK_SELECTOR: &str = ".product-item__title";

/// Query parameter carrying the listing page number
pub const PAGE_PARAM: &str = "page";

pub struct LinkCollector {
    link: Selector,
}

impl LinkCollector {
    pub fn new(link_selector: &str) -> Result<Self> {
        Ok(Self {
            link: compile_selector(link_selector)?,
        })
    }

    /// Absolute `href`s of every matching anchor, in document order
    pub fn extract_links(&self, page_url: &Url, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.link)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(|href| match page_url.join(href.trim()) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    debug!("Skipping unusable link '{}': {}", href, e);
                    None
                }
            })
            .collect()
    }

    /// Collect up to `max_links` unique links, starting at `start_url` and
    /// walking `page=2, 3, ...` until enough are found or a page adds nothing.
    pub async fn collect<F: PageFetcher>(
        &self,
        fetcher: &F,
        start_url: &str,
        max_links: usize,
        delay: Duration,
    ) -> Result<Vec<String>> {
        let base = Url::parse(start_url)
            .with_context(|| format!("Invalid listing URL '{}'", start_url))?;

        let mut links = Vec::new();
        let mut seen = HashSet::new();
        let mut page_url = base.clone();
        let mut page_number = 1u32;

        while links.len() < max_links {
            if page_number > 1 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            info!("Collecting links from {}", page_url);
            let page = match fetcher.fetch(page_url.as_str()).await {
                Ok(page) => page,
                Err(e) if page_number == 1 => {
                    return Err(e).with_context(|| format!("Failed to fetch {}", page_url));
                }
                Err(e) => {
                    warn!("Stopping at {}: {}", page_url, e);
                    break;
                }
            };

            let before = links.len();
            for link in self.extract_links(&page_url, &page.html) {
                if links.len() >= max_links {
                    break;
                }
                if seen.insert(link.clone()) {
                    links.push(link);
                }
            }

            if links.len() == before {
                debug!("No new links on page {}, stopping", page_number);
                break;
            }

            page_number += 1;
            page_url = with_page(&base, page_number);
        }

        info!("Collected {} links", links.len());
        Ok(links)
    }
}

/// `base` with its page query parameter set to `page`
pub fn with_page(base: &Url, page: u32) -> Url {
    let pairs: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair(PAGE_PARAM, &page.to_string());
    url
}

#[cfg(test)]
#[path = "links_test.rs"]
mod links_test;
