//! Structured-markup query capability.

use ego_tree::{NodeMut, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};

use crate::error_handling::ExtractionError;

/// What the extraction pipeline needs from a markup library: parse, query by
/// selector, copy and detach subtrees and serialize.
///
/// Selectors are passed through as opaque strings; an engine reports the ones
/// it cannot parse as [`ExtractionError::InvalidSelector`].
pub trait MarkupEngine {
    /// A parsed document or fragment.
    type Document;

    /// Parses a complete page.
    fn parse_document(&self, markup: &str) -> Self::Document;

    /// A fragment with no content, ready to collect selected subtrees.
    fn empty_fragment(&self) -> Self::Document;

    /// Copies every element of `source` matching `selector`, with its
    /// descendants, to the end of `target` in document order. Returns the
    /// number of elements copied.
    fn append_matching(
        &self,
        source: &Self::Document,
        selector: &str,
        target: &mut Self::Document,
    ) -> Result<usize, ExtractionError>;

    /// Detaches every element matching `selector` along with its descendants.
    /// Returns the number of elements removed.
    fn remove_matching(
        &self,
        document: &mut Self::Document,
        selector: &str,
    ) -> Result<usize, ExtractionError>;

    /// Serializes the contents of a fragment built from `empty_fragment`.
    fn serialize_fragment(&self, document: &Self::Document) -> String;
}

/// [`MarkupEngine`] on the `scraper` crate (html5ever parsing, CSS selectors).
///
/// Selected subtrees are copied node by node into the fragment's tree, so
/// elements that only parse inside a table keep their tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperEngine;

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn copy_subtree(source: NodeRef<'_, Node>, parent: &mut NodeMut<'_, Node>) {
    let mut copy = parent.append(source.value().clone());
    for child in source.children() {
        copy_subtree(child, &mut copy);
    }
}

impl MarkupEngine for ScraperEngine {
    type Document = Html;

    fn parse_document(&self, markup: &str) -> Html {
        Html::parse_document(markup)
    }

    fn empty_fragment(&self) -> Html {
        Html::parse_fragment("")
    }

    fn append_matching(
        &self,
        source: &Html,
        selector: &str,
        target: &mut Html,
    ) -> Result<usize, ExtractionError> {
        let selector_parsed = parse_selector(selector)?;
        let root = source.root_element();

        // ElementRef::select only walks descendants
        let mut matches: Vec<ElementRef<'_>> = Vec::new();
        if selector_parsed.matches(&root) {
            matches.push(root);
        }
        matches.extend(root.select(&selector_parsed));

        let container = target.root_element().id();
        if let Some(mut parent) = target.tree.get_mut(container) {
            for element in &matches {
                copy_subtree(**element, &mut parent);
            }
        }

        log::debug!("Selector '{}' matched {} elements", selector, matches.len());
        Ok(matches.len())
    }

    fn remove_matching(
        &self,
        document: &mut Html,
        selector: &str,
    ) -> Result<usize, ExtractionError> {
        let selector_parsed = parse_selector(selector)?;

        // Walk the attached tree only; detached nodes stay in the arena
        let ids: Vec<_> = document
            .root_element()
            .select(&selector_parsed)
            .map(|element| element.id())
            .collect();

        let mut removed = 0;
        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }

        log::debug!("Selector '{}' removed {} elements", selector, removed);
        Ok(removed)
    }

    fn serialize_fragment(&self, document: &Html) -> String {
        document.root_element().inner_html()
    }
}
