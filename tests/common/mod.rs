// Shared test web server serving canned store pages
#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;

pub const CARD_PRODUCT: &str = include_str!("../fixtures/card_product.html");
pub const MARKUP_PRODUCT: &str = include_str!("../fixtures/markup_product.html");
pub const NO_SPECS_PRODUCT: &str = include_str!("../fixtures/no_specs_product.html");

/// Products per listing page and number of listing pages
const PAGE_SIZE: usize = 3;
const LISTING_PAGES: usize = 2;

fn create_app() -> Router {
    Router::new()
        .route("/products/sony-a7-iv", get(|| async { Html(CARD_PRODUCT) }))
        .route("/products/fujifilm-x100vi", get(|| async { Html(MARKUP_PRODUCT) }))
        .route("/products/camera-strap", get(|| async { Html(NO_SPECS_PRODUCT) }))
        .route(
            "/products/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream failure") }),
        )
        .route("/collections/cameras", get(listing))
}

/// Listing page `page` (1-based) links products `camera-N`; past the last
/// page the listing is empty.
async fn listing(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);

    let items: String = if page <= LISTING_PAGES {
        ((page - 1) * PAGE_SIZE + 1..=page * PAGE_SIZE)
            .map(|n| {
                format!(
                    r#"<div class="product-item"><a class="product-item__title" href="/products/camera-{n}">Camera {n}</a></div>"#
                )
            })
            .collect()
    } else {
        String::new()
    };

    Html(format!(
        r#"<html><body><a class="header__logo" href="/">Store</a>{items}</body></html>"#
    ))
}

/// Start the test server on its own thread and runtime; returns the base URL.
pub fn spawn_test_server() -> String {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, create_app())
                .await
                .expect("Test server failed");
        });
    });

    format!("http://{}", addr)
}
