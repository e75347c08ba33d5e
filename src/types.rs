use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column names that always lead the output table, in this order
pub const FIXED_COLUMNS: [&str; 4] = ["url", "product_name", "price", "stock_status"];

/// One scraped product
///
/// `product_name`, `price` and `stock_status` are `None` when the page did not
/// contain the element, which is distinct from an element scraped as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Detail page URL, always present
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
    /// Whitelisted specification attributes found on the page
    #[serde(flatten)]
    pub specs: BTreeMap<String, String>,
}

impl Record {
    /// A record holding nothing but its URL (used for failed fetches)
    pub fn bare(url: impl Into<String>) -> Self {
        Record {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            "url" => Some(self.url.as_str()),
            "product_name" => self.product_name.as_deref(),
            "price" => self.price.as_deref(),
            "stock_status" => self.stock_status.as_deref(),
            other => self.specs.get(other).map(String::as_str),
        }
    }
}

/// Where a page's HTML came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    /// Raw HTTP response body
    Static,
    /// DOM source of a page rendered by a browser
    Rendered,
}

/// Page content handed from a fetcher to the extraction pipeline
#[derive(Debug, Clone)]
pub struct PageContent {
    pub html: String,
    pub origin: PageOrigin,
}

impl PageContent {
    pub fn new(html: impl Into<String>, origin: PageOrigin) -> Self {
        PageContent {
            html: html.into(),
            origin,
        }
    }
}

/// Which fetcher backs a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Plain HTTP GET, no JavaScript
    Http,
    /// Real browser over WebDriver
    Browser,
}

/// Output format for scraped records
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table with a header row
    Tsv,
    /// One JSON object per line
    Json,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
