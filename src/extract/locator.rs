use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::compile_selector;

/// Header text that marks the specifications section
pub const SPECIFICATIONS_MARKER: &str = "Specifications";

/// Page layouts the specifications block is known to appear in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    /// `.card` with a `.card__header` and a `.card__section` body
    Card,
    /// `<details>` with a `<summary>` header and a `<div>` body
    Disclosure,
    /// `h2`-`h4` heading followed by a sibling body element
    Heading,
}

impl BlockShape {
    /// Scan order
    pub const ALL: [BlockShape; 3] = [BlockShape::Card, BlockShape::Disclosure, BlockShape::Heading];
}

/// The content container of a located specifications section
#[derive(Debug, Clone, Copy)]
pub struct SpecBlock<'a> {
    pub shape: BlockShape,
    pub content: ElementRef<'a>,
}

/// Finds the "Specifications" section of a detail page
pub struct SpecBlockLocator {
    marker: String,
    card: Selector,
    card_header: Selector,
    card_section: Selector,
    details: Selector,
    summary: Selector,
    details_body: Selector,
    heading: Selector,
}

impl SpecBlockLocator {
    pub fn new() -> Result<Self> {
        Self::with_marker(SPECIFICATIONS_MARKER)
    }

    /// Build a locator that matches headers containing `marker`
    pub fn with_marker(marker: &str) -> Result<Self> {
        Ok(Self {
            marker: marker.to_string(),
            card: compile_selector(".card")?,
            card_header: compile_selector(".card__header")?,
            card_section: compile_selector(".card__section")?,
            details: compile_selector("details")?,
            summary: compile_selector("summary")?,
            details_body: compile_selector("div")?,
            heading: compile_selector("h2, h3, h4")?,
        })
    }

    /// Return the first specifications block on the page, scanning every
    /// known shape in turn. `None` means the page has no such section.
    pub fn locate<'a>(&self, document: &'a Html) -> Option<SpecBlock<'a>> {
        BlockShape::ALL.iter().find_map(|&shape| {
            let content = match shape {
                BlockShape::Card => self.locate_card(document),
                BlockShape::Disclosure => self.locate_disclosure(document),
                BlockShape::Heading => self.locate_heading(document),
            }?;
            debug!("Found specifications block ({:?})", shape);
            Some(SpecBlock { shape, content })
        })
    }

    fn locate_card<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        for card in document.select(&self.card) {
            for header in card.select(&self.card_header) {
                if self.is_marker(header) {
                    if let Some(section) = card.select(&self.card_section).next() {
                        return Some(section);
                    }
                    debug!("Specifications card has no .card__section, skipping");
                }
            }
        }
        None
    }

    fn locate_disclosure<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .select(&self.details)
            .filter(|details| {
                details
                    .select(&self.summary)
                    .any(|summary| self.is_marker(summary))
            })
            .find_map(|details| details.select(&self.details_body).next())
    }

    fn locate_heading<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .select(&self.heading)
            .filter(|heading| self.is_marker(*heading))
            .find_map(|heading| heading.next_siblings().find_map(ElementRef::wrap))
    }

    fn is_marker(&self, header: ElementRef<'_>) -> bool {
        header.text().collect::<String>().contains(&self.marker)
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;
