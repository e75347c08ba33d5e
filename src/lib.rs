//! # camscrape
#![allow(clippy::uninlined_format_args)]
//!
//! Scrapes camera product pages of an online store into a tab-separated table.
//!
//! A run has two stages:
//!
//! 1. `links` walks the paginated listing pages and writes one detail-page
//!    URL per line.
//! 2. `details` visits every URL from that file and extracts the product
//!    name, price, stock status and a fixed set of technical attributes
//!    from the page's "Specifications" section.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Collect the first 100 product links
//! camscrape links "https://thecamerastore.com/collections/cameras" --max-links 100 -o urls.txt
//!
//! # Scrape each detail page with plain HTTP
//! camscrape details urls.txt > cameras.tsv
//!
//! # Use a headless Chrome instead (needs chromedriver in PATH)
//! camscrape details urls.txt --fetcher browser --browser chrome
//!
//! # Keep a different attribute set
//! camscrape details urls.txt --attribute Weight --attribute "Lens Mount"
//! ```
//!
//! ## Output
//!
//! The header row is `url`, `product_name`, `price`, `stock_status`, then every
//! attribute found on any page, sorted. Cells a page did not provide are
//! empty. A page that fails to load still gets a row with only its URL.
//!
//! ## Library Usage
//!
//! ```no_run
//! use camscrape::{HttpFetcher, RecordBuilder, RecordExtractor, ProductSelectors, Whitelist};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let fetcher = HttpFetcher::new(camscrape::config::DEFAULT_USER_AGENT, Duration::from_secs(30))?;
//! let extractor = RecordExtractor::new(&ProductSelectors::default(), Whitelist::cameras())?;
//! let builder = RecordBuilder::new(fetcher, extractor);
//!
//! let urls = vec!["https://example.com/products/camera".to_string()];
//! let records = builder.build_all(&urls, Duration::from_secs(1)).await;
//! if let Some(table) = camscrape::table::assemble(&records) {
//!     print!("{}", table.to_tsv());
//! }
//! # Ok(())
//! # }
//! ```

/// Run configuration
pub mod config;

/// Error types and exit codes
pub mod errors;

/// Specifications block location, parsing and normalization
pub mod extract;

/// Page fetching capability and the plain HTTP fetcher
pub mod fetch;

/// URL-list input and output sinks
pub mod files;

/// Listing-page link collection
pub mod links;

/// Per-page record construction
pub mod record;

/// Table assembly and TSV rendering
pub mod table;

/// Record and page types
pub mod types;

/// Browser-backed page fetching
pub mod webdriver;

/// Automatic WebDriver process management
pub mod webdriver_manager;

pub use config::ScrapeConfig;
pub use errors::{FetchError, ScrapeError};
pub use extract::{FieldNormalizer, SpecBlockLocator, SpecLayout, SpecLineParser, Whitelist};
pub use fetch::{HttpFetcher, PageFetcher};
pub use links::LinkCollector;
pub use record::{ProductSelectors, RecordBuilder, RecordExtractor};
pub use table::Table;
pub use types::{FetcherKind, OutputFormat, PageContent, PageOrigin, Record};
pub use webdriver::{BrowserFetcher, BrowserOptions, BrowserType};
