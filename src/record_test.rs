// Unit tests for record extraction and the per-URL build loop

use super::*;
use crate::errors::FetchError;
use crate::types::PageOrigin;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

const PRODUCT_PAGE: &str = r#"
<html><body>
  <h1 class="product-meta__title">Canon EOS R6 Mark II</h1>
  <div class="price"><span class="visually-hidden">Sale price</span>
    $3,199.00</div>
  <div class="price">$99.00</div>
  <p class="product-form__inventory">In stock</p>
  <div class="card">
    <div class="card__header">Overview</div>
    <div class="card__section">Full-frame mirrorless camera.</div>
  </div>
  <div class="card">
    <div class="card__header"><h2>Specifications</h2></div>
    <div class="card__section">
      <div>Resolution: 24.2MP</div>
      <div>Weight: 670 g</div>
      <div>Lens Mount: Canon RF</div>
      <div>Color: Black</div>
      <div>Weight: 680 g</div>
    </div>
  </div>
</body></html>"#;

/// In-memory fetcher serving canned pages; unknown URLs are a 404
struct FakeFetcher {
    pages: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl FakeFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        FakeFetcher {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .map(|html| PageContent::new(html.clone(), PageOrigin::Static))
            .ok_or(FetchError::Status { status: 404 })
    }
}

fn extractor() -> RecordExtractor {
    RecordExtractor::new(&ProductSelectors::default(), Whitelist::cameras()).unwrap()
}

fn specs(list: &[(&str, &str)]) -> BTreeMap<String, String> {
    list.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_extract_full_record() {
    let page = PageContent::new(PRODUCT_PAGE, PageOrigin::Static);
    let record = extractor().extract("https://shop.test/p/r6", &page);

    assert_eq!(
        record,
        Record {
            url: "https://shop.test/p/r6".to_string(),
            product_name: Some("Canon EOS R6 Mark II".to_string()),
            price: Some("$3,199.00".to_string()),
            stock_status: Some("In stock".to_string()),
            specs: specs(&[
                ("Lens Mount", "Canon RF"),
                ("Sensor Resolution", "24.2MP"),
                ("Weight", "680 g"),
            ]),
        }
    );
}

#[test]
fn test_extract_is_idempotent() {
    let page = PageContent::new(PRODUCT_PAGE, PageOrigin::Static);
    let extractor = extractor();
    assert_eq!(
        extractor.extract("u", &page),
        extractor.extract("u", &page)
    );
}

#[test]
fn test_missing_fields_are_absent() {
    let page = PageContent::new(
        r#"<html><body><h1 class="product-meta__title">Lonely</h1></body></html>"#,
        PageOrigin::Static,
    );
    let record = extractor().extract("u", &page);

    assert_eq!(record.product_name.as_deref(), Some("Lonely"));
    assert_eq!(record.price, None);
    assert_eq!(record.stock_status, None);
    assert!(record.specs.is_empty());
}

#[test]
fn test_empty_element_is_present_but_empty() {
    let page = PageContent::new(
        r#"<html><body><span class="product-form__inventory"> </span></body></html>"#,
        PageOrigin::Static,
    );
    let record = extractor().extract("u", &page);
    assert_eq!(record.stock_status.as_deref(), Some(""));
}

#[test]
fn test_price_without_label_is_kept() {
    assert_eq!(strip_sale_label("$10.00"), "$10.00");
    assert_eq!(strip_sale_label("Sale price\n$10.00"), "$10.00");
    assert_eq!(strip_sale_label("Sale price$10.00"), "$10.00");
}

#[test]
fn test_markup_fragment_page() {
    let page = PageContent::new(
        r#"<html><body>
          <h2>Specifications</h2>
          <div class="rte"><p><strong>Sensor Resolution:</strong>45MP<br><strong>Resolution:</strong> 20MP<br><strong>Shutter Speed:</strong> 1/8000 s</p></div>
        </body></html>"#,
        PageOrigin::Static,
    );
    let record = extractor().extract("u", &page);
    assert_eq!(
        record.specs,
        specs(&[("Sensor Resolution", "45MP"), ("Shutter Speed", "1/8000 s")])
    );
}

#[tokio::test]
async fn test_fetch_failure_yields_bare_record() {
    let builder = RecordBuilder::new(FakeFetcher::new(&[]), extractor());
    let record = builder.build("https://shop.test/missing").await;
    assert_eq!(record, Record::bare("https://shop.test/missing"));
}

#[tokio::test]
async fn test_build_all_keeps_order_and_row_count() {
    let fetcher = FakeFetcher::new(&[
        ("https://shop.test/a", PRODUCT_PAGE),
        ("https://shop.test/c", PRODUCT_PAGE),
    ]);
    let builder = RecordBuilder::new(fetcher, extractor());
    let urls: Vec<String> = ["https://shop.test/a", "https://shop.test/b", "https://shop.test/c"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let records = builder.build_all(&urls, Duration::ZERO).await;

    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
        ["https://shop.test/a", "https://shop.test/b", "https://shop.test/c"]
    );
    assert!(records[0].product_name.is_some());
    assert_eq!(records[1], Record::bare("https://shop.test/b"));
    assert!(records[2].product_name.is_some());
}

#[tokio::test]
async fn test_build_requests_each_url_once_in_order() {
    let fetcher = FakeFetcher::new(&[]);
    let builder = RecordBuilder::new(fetcher, extractor());
    builder.build("x").await;
    builder.build("y").await;
    assert_eq!(*builder.fetcher.requested.borrow(), vec!["x", "y"]);
}
