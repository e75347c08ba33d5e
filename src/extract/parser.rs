use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::debug;

use super::compile_selector;
use super::text::{break_pieces, rendered_text};
use crate::types::PageOrigin;

/// Candidate `(key, value)` pair with both halves trimmed
pub type RawPair = (String, String);

/// Strategy for turning a specifications block into candidate pairs.
///
/// Each variant handles one HTML shape observed in practice; the variant is
/// chosen by [`SpecLineParser::select_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecLayout {
    /// Rendered text, one `key: value` per line, split on the first `": "`
    LineText,
    /// A single fragment holding every pair, separated by `<br>` elements
    SingleFragment,
    /// No fragments at all: the whole block is split at its `<br>` elements
    Blob,
    /// One fragment per pair, each split on its first `:`
    Fragments,
}

/// Splits a located specifications block into candidate pairs
pub struct SpecLineParser {
    fragment: Selector,
    line_break: Selector,
    whitespace: Regex,
}

impl SpecLineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fragment: compile_selector("p, li")?,
            line_break: compile_selector("br")?,
            whitespace: Regex::new(r"\s+").context("Invalid whitespace pattern")?,
        })
    }

    /// Pick the strategy for a block.
    ///
    /// Browser-rendered pages are always read as line text. Static markup is
    /// classified by how many `p`/`li` fragments the block holds.
    pub fn select_layout(&self, block: ElementRef<'_>, origin: PageOrigin) -> SpecLayout {
        if origin == PageOrigin::Rendered {
            return SpecLayout::LineText;
        }

        let fragments = block.select(&self.fragment).count();
        let has_breaks = block.select(&self.line_break).next().is_some();

        let layout = match (fragments, has_breaks) {
            (0, false) => SpecLayout::LineText,
            (0, true) => SpecLayout::Blob,
            (1, _) => SpecLayout::SingleFragment,
            _ => SpecLayout::Fragments,
        };
        debug!(
            "Specifications layout {:?} ({} fragments, breaks: {})",
            layout, fragments, has_breaks
        );
        layout
    }

    /// Select a layout and parse the block with it
    pub fn parse<'a>(
        &'a self,
        block: ElementRef<'a>,
        origin: PageOrigin,
    ) -> Box<dyn Iterator<Item = RawPair> + 'a> {
        let layout = self.select_layout(block, origin);
        self.parse_with(layout, block)
    }

    /// Yield the candidate pairs of `block` under a given layout.
    ///
    /// Markup layouts walk the block's nodes lazily, one `<br>`-delimited
    /// piece or fragment at a time. Line text renders the whole block once
    /// and then splits its lines. Pieces without a usable delimiter, key or
    /// value are skipped.
    pub fn parse_with<'a>(
        &'a self,
        layout: SpecLayout,
        block: ElementRef<'a>,
    ) -> Box<dyn Iterator<Item = RawPair> + 'a> {
        match layout {
            SpecLayout::LineText => {
                let lines: Vec<String> = rendered_text(block).lines().map(String::from).collect();
                Box::new(lines.into_iter().filter_map(|line| split_line(&line)))
            }
            SpecLayout::SingleFragment => Box::new(
                block
                    .select(&self.fragment)
                    .take(1)
                    .flat_map(break_pieces)
                    .filter_map(move |piece| self.split_markup(&piece)),
            ),
            SpecLayout::Blob => {
                Box::new(break_pieces(block).filter_map(move |piece| self.split_markup(&piece)))
            }
            SpecLayout::Fragments => Box::new(
                block
                    .select(&self.fragment)
                    .map(|fragment| break_pieces(fragment).collect::<Vec<_>>().join(" "))
                    .filter_map(move |piece| self.split_markup(&piece)),
            ),
        }
    }

    /// Split a piece's text on the first `:`, collapsing whitespace in both halves
    fn split_markup(&self, piece: &str) -> Option<RawPair> {
        let (key, value) = piece.split_once(':')?;
        non_empty(self.collapse(key), self.collapse(value))
    }

    fn collapse(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

/// Parse line-oriented text, one `key: value` pair per line
pub fn parse_lines(text: &str) -> impl Iterator<Item = RawPair> + '_ {
    text.lines().filter_map(split_line)
}

/// Split a rendered line on the first `": "` (colon plus exactly one space)
fn split_line(line: &str) -> Option<RawPair> {
    let (key, value) = line.split_once(": ")?;
    non_empty(key.trim().to_string(), value.trim().to_string())
}

fn non_empty(key: String, value: String) -> Option<RawPair> {
    if key.is_empty() || value.is_empty() {
        None
    } else {
        Some((key, value))
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;
