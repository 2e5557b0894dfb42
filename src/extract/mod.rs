//! Selective extraction.
//!
//! A page is reduced in three ordered stages:
//! 1. Absolutize: hyperlink targets are resolved against the page URL
//! 2. Include: the matches of every include selector, in selector order and
//!    then document order, are copied with their descendants into a reduced
//!    document
//! 3. Exclude: every element of the reduced document matching an exclude
//!    selector is removed with its descendants
//!
//! Elements not matched by any include selector are discarded, so an empty
//! include list yields an empty document.

mod links;
mod markup;

use url::Url;

use crate::error_handling::ExtractionError;
use crate::rules::SelectionRule;

pub use markup::{MarkupEngine, ScraperEngine};

/// Applies selection rules to raw markup.
#[derive(Debug, Clone, Default)]
pub struct Extractor<M: MarkupEngine = ScraperEngine> {
    engine: M,
}

impl Extractor<ScraperEngine> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: MarkupEngine> Extractor<M> {
    pub fn with_engine(engine: M) -> Self {
        Self { engine }
    }

    /// Reduces `markup` to the parts selected by `rule`, with links resolved
    /// against `base_url`.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::InvalidBaseUrl` if `base_url` is not an absolute URL
    /// - `ExtractionError::InvalidSelector` if any selector of the rule cannot be parsed
    /// - `ExtractionError::LinkRewrite` if the link rewriter rejects the page
    pub fn extract(
        &self,
        markup: &str,
        rule: &SelectionRule,
        base_url: &str,
    ) -> Result<String, ExtractionError> {
        let base = Url::parse(base_url).map_err(|e| ExtractionError::InvalidBaseUrl {
            base: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let document = self.absolutize(markup, &base)?;
        let reduced = self.include(&document, &rule.include)?;
        self.exclude(reduced, &rule.exclude)
    }

    /// Parses `markup` with every hyperlink target made absolute.
    pub fn absolutize(&self, markup: &str, base: &Url) -> Result<M::Document, ExtractionError> {
        let rewritten = links::absolutize_links(markup, base)?;
        Ok(self.engine.parse_document(&rewritten))
    }

    /// Collects the matches of each selector into a new fragment.
    pub fn include(
        &self,
        document: &M::Document,
        selectors: &[String],
    ) -> Result<M::Document, ExtractionError> {
        let mut reduced = self.engine.empty_fragment();
        for selector in selectors {
            self.engine.append_matching(document, selector, &mut reduced)?;
        }
        Ok(reduced)
    }

    /// Removes every match of each selector from `reduced`, in selector order,
    /// and serializes what is left.
    pub fn exclude(
        &self,
        mut reduced: M::Document,
        selectors: &[String],
    ) -> Result<String, ExtractionError> {
        for selector in selectors {
            self.engine.remove_matching(&mut reduced, selector)?;
        }
        Ok(self.engine.serialize_fragment(&reduced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/blog/post1";

    fn rule(include: &[&str], exclude: &[&str]) -> SelectionRule {
        SelectionRule {
            patterns: vec!["example.com".to_string()],
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_removes_excluded_paragraphs_only() {
        let markup = r#"<html><body>
            <h2>Heading</h2>
            <p>First</p>
            <p class="ad">Buy now</p>
            <p>Second</p>
        </body></html>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["p"], &["p.ad"]), BASE)
            .expect("extract");

        assert_eq!(out, "<p>First</p><p>Second</p>");
    }

    #[test]
    fn test_extract_is_idempotent_on_its_output() {
        let extractor = Extractor::new();
        let selection = rule(&["p"], &["p.ad"]);
        let markup = r#"<p>First</p><p class="ad">Buy</p><div><p>Nested <a href="/more">more</a></p></div>"#;

        let once = extractor.extract(markup, &selection, BASE).expect("first");
        let twice = extractor.extract(&once, &selection, BASE).expect("second");

        assert_eq!(once, twice);
        assert!(!twice.contains("Buy"));
    }

    #[test]
    fn test_article_with_nested_script() {
        let markup = r#"<!DOCTYPE html><html><head><title>Post</title></head><body>
            <nav><a href="/">Home</a></nav>
            <article><h1>Title</h1><p>Body</p><script>track();</script></article>
            <footer>Footer</footer>
        </body></html>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["article"], &["script", "nav"]), BASE)
            .expect("extract");

        assert_eq!(out, "<article><h1>Title</h1><p>Body</p></article>");
    }

    #[test]
    fn test_links_are_absolutized() {
        let markup = r#"<p><a href="/a/b">rel</a> <a href="https://y.test/z">abs</a></p>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["p"], &[]), "https://x.test/c/d")
            .expect("extract");

        assert!(out.contains(r#"<a href="https://x.test/a/b">rel</a>"#));
        assert!(out.contains(r#"<a href="https://y.test/z">abs</a>"#));
    }

    #[test]
    fn test_non_hyperlink_attributes_untouched() {
        let markup = r#"<div><img src="/logo.png"><a href="../up">up</a></div>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["div"], &[]), "https://x.test/c/d")
            .expect("extract");

        assert!(out.contains(r#"<img src="/logo.png">"#));
        assert!(out.contains(r#"<a href="https://x.test/up">up</a>"#));
    }

    #[test]
    fn test_include_order_is_selector_then_document() {
        let markup = "<p>p1</p><h1>h</h1><p>p2</p>";

        let out = Extractor::new()
            .extract(markup, &rule(&["h1", "p"], &[]), BASE)
            .expect("extract");

        assert_eq!(out, "<h1>h</h1><p>p1</p><p>p2</p>");
    }

    #[test]
    fn test_empty_include_yields_empty_document() {
        let out = Extractor::new()
            .extract("<p>text</p>", &rule(&[], &["script"]), BASE)
            .expect("extract");
        assert_eq!(out, "");
    }

    #[test]
    fn test_include_matching_nothing_contributes_nothing() {
        let out = Extractor::new()
            .extract("<p>text</p>", &rule(&["article", "p"], &[]), BASE)
            .expect("extract");
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn test_exclude_matching_nothing_is_noop() {
        let out = Extractor::new()
            .extract("<p>text</p>", &rule(&["p"], &["nav"]), BASE)
            .expect("extract");
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn test_exclusion_happens_after_inclusion() {
        // The section is included whole and its nested div is then removed
        let markup = r#"<section><div class="share">share</div><p>text</p></section>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["section"], &["div.share"]), BASE)
            .expect("extract");

        assert_eq!(out, "<section><p>text</p></section>");
    }

    #[test]
    fn test_table_rows_keep_their_tags() {
        let markup = r#"<table><tr class=r><td>cell1</td></tr><tr class=r><td>cell2</td></tr></table>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["tr.r"], &[]), BASE)
            .expect("extract");

        assert_eq!(
            out,
            r#"<tr class="r"><td>cell1</td></tr><tr class="r"><td>cell2</td></tr>"#
        );
    }

    #[test]
    fn test_cells_excluded_from_included_rows() {
        let markup = r#"<table><tr class=r><td>cell1</td></tr><tr class=r><td>cell2</td></tr></table>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["tr.r"], &["td"]), BASE)
            .expect("extract");

        assert_eq!(out, r#"<tr class="r"></tr><tr class="r"></tr>"#);
        assert!(!out.contains("cell"));
    }

    #[test]
    fn test_caption_and_columns_survive_inclusion() {
        let markup = r#"<table><caption>Cap</caption><colgroup><col span="2"></colgroup><thead><tr><th>h</th></tr></thead></table>"#;

        let out = Extractor::new()
            .extract(markup, &rule(&["caption", "col", "thead"], &["th"]), BASE)
            .expect("extract");

        assert_eq!(
            out,
            r#"<caption>Cap</caption><col span="2"><thead><tr></tr></thead>"#
        );
    }

    #[test]
    fn test_namespaced_attributes_survive() {
        let markup = r##"<div><svg><use xlink:href="#icon"></use></svg><a href="/x">x</a></div>"##;

        let out = Extractor::new()
            .extract(markup, &rule(&["div"], &[]), "https://x.test/c/d")
            .expect("extract");

        assert!(out.contains(r##"xlink:href="#icon""##), "got {}", out);
        assert!(out.contains(r#"<a href="https://x.test/x">x</a>"#));
    }

    #[test]
    fn test_invalid_selector() {
        let result = Extractor::new().extract("<p>x</p>", &rule(&["p"], &["<<"]), BASE);
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Extractor::new().extract("<p>x</p>", &rule(&["p"], &[]), "not a url");
        assert!(matches!(result, Err(ExtractionError::InvalidBaseUrl { .. })));
    }
}
