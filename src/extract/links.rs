//! Hyperlink resolution.

use lol_html::{element, rewrite_str, RewriteStrSettings};
use url::Url;

use crate::error_handling::ExtractionError;

/// Elements whose `href` attribute is a hyperlink target.
const HYPERLINK_SELECTOR: &str = "a[href], area[href], link[href]";

/// Rewrites every hyperlink target in `markup` to an absolute URL.
///
/// Only `href` values change; everything else passes through the rewriter
/// as written.
pub fn absolutize_links(markup: &str, base: &Url) -> Result<String, ExtractionError> {
    rewrite_str(
        markup,
        RewriteStrSettings {
            element_content_handlers: vec![element!(HYPERLINK_SELECTOR, |el| {
                if let Some(resolved) = el
                    .get_attribute("href")
                    .and_then(|href| resolve_link(base, &href))
                {
                    el.set_attribute("href", &resolved)?;
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| ExtractionError::LinkRewrite {
        reason: e.to_string(),
    })
}

/// Resolves `href` against `base`.
///
/// Absolute references come back normalized but otherwise unchanged. Returns
/// `None` when the reference cannot be joined, in which case the caller keeps
/// the original value.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    match base.join(href.trim()) {
        Ok(resolved) => Some(resolved.into()),
        Err(e) => {
            log::debug!("Keeping unresolvable link '{}' as is: {}", href, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://x.test/c/d").expect("valid base")
    }

    #[test]
    fn test_root_relative_link() {
        assert_eq!(
            resolve_link(&base(), "/a/b").as_deref(),
            Some("https://x.test/a/b")
        );
    }

    #[test]
    fn test_path_relative_link() {
        assert_eq!(
            resolve_link(&base(), "e/f").as_deref(),
            Some("https://x.test/c/e/f")
        );
        assert_eq!(
            resolve_link(&base(), "../g").as_deref(),
            Some("https://x.test/g")
        );
    }

    #[test]
    fn test_absolute_link_unchanged() {
        assert_eq!(
            resolve_link(&base(), "https://y.test/z").as_deref(),
            Some("https://y.test/z")
        );
    }

    #[test]
    fn test_protocol_relative_link() {
        assert_eq!(
            resolve_link(&base(), "//cdn.test/app.css").as_deref(),
            Some("https://cdn.test/app.css")
        );
    }

    #[test]
    fn test_fragment_and_other_schemes() {
        assert_eq!(
            resolve_link(&base(), "#top").as_deref(),
            Some("https://x.test/c/d#top")
        );
        assert_eq!(
            resolve_link(&base(), "mailto:me@x.test").as_deref(),
            Some("mailto:me@x.test")
        );
    }

    #[test]
    fn test_unjoinable_link() {
        assert_eq!(resolve_link(&base(), "http://[::1"), None);
    }

    #[test]
    fn test_absolutize_links_rewrites_hyperlinks_only() {
        let markup = r#"<a href="/a">a</a><area href="m"><link rel="stylesheet" href="s.css"><img src="/i.png"><base href="/b/">"#;
        let out = absolutize_links(markup, &base()).expect("rewrite");

        assert!(out.contains(r#"<a href="https://x.test/a">a</a>"#));
        assert!(out.contains(r#"<area href="https://x.test/c/m">"#));
        assert!(out.contains(r#"href="https://x.test/c/s.css""#));
        assert!(out.contains(r#"<img src="/i.png">"#));
        assert!(out.contains(r#"<base href="/b/">"#));
    }

    #[test]
    fn test_absolutize_links_keeps_other_markup_verbatim() {
        let markup = r##"<svg><use xlink:href="#icon"></use></svg><a href="http://[::1">bad</a>"##;
        let out = absolutize_links(markup, &base()).expect("rewrite");
        assert_eq!(out, markup);
    }
}
