//! Detail-page extraction: locate the "Specifications" block, split it into
//! candidate `key: value` pairs and reduce them to whitelisted attributes.

use anyhow::Result;
use scraper::Selector;

pub mod locator;
pub mod normalize;
pub mod parser;
pub mod text;

pub use locator::{BlockShape, SpecBlock, SpecBlockLocator};
pub use normalize::{CAMERA_ATTRIBUTES, FieldNormalizer, Synonym, Whitelist, is_reserved};
pub use parser::{RawPair, SpecLayout, SpecLineParser, parse_lines};
pub use text::{break_pieces, rendered_text};

/// Compile a CSS selector, turning the borrowed parse error into an owned one
pub(crate) fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid CSS selector '{}': {}", selector, e))
}
