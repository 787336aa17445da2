// src/links/html.rs
// =============================================================================
// This module extracts anchor links from HTML pages.
//
// We run the html5ever tokenizer over the page and record the first href of
// every opening or self-closing `<a>` tag. No tree is built, so markup like
// `<p><a href=x></p><p>` still counts as one anchor. A tree builder would
// reopen the `<a>` in each following block and report the link once per copy.
//
// The page is tokenized in a single pass when `extract_links` is called.
// `Links` then resolves each collected href against the base URL only as the
// iterator is advanced.
// =============================================================================

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use thiserror::Error;
use url::Url;

// An href that could not be turned into an absolute URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot resolve href {href:?}: {reason}")]
pub struct MalformedHref {
    pub href: String,
    pub reason: String,
}

// The links found on one page, in source order.
// Yields `Err` for hrefs that do not resolve.
#[derive(Debug)]
pub struct Links {
    base: Url,
    hrefs: std::vec::IntoIter<String>,
}

impl Iterator for Links {
    type Item = Result<Url, MalformedHref>;

    fn next(&mut self) -> Option<Self::Item> {
        let href = self.hrefs.next()?;
        Some(self.base.join(&href).map_err(|e| MalformedHref {
            reason: e.to_string(),
            href,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hrefs.size_hint()
    }
}

// Extracts every `<a href>` link from `html`, resolving relative references
// against `base`.
//
// Parameters:
//   html: the page markup
//   base: the URL the page was fetched from
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base = "https://example.com/page"
//   yields Ok("https://example.com/docs")
pub fn extract_links(html: &str, base: &Url) -> Links {
    Links {
        base: base.clone(),
        hrefs: collect_hrefs(html).into_iter(),
    }
}

// Token sink that keeps the href of each `<a>` start tag
#[derive(Default)]
struct AnchorSink {
    hrefs: Vec<String>,
}

impl TokenSink for AnchorSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let Token::TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        if tag.kind != TagKind::StartTag {
            return TokenSinkResult::Continue;
        }

        match &*tag.name {
            "a" => {
                // The tokenizer already drops repeated attributes, so this is
                // the first href in source order
                if let Some(href) = tag.attrs.iter().find(|attr| &*attr.name.local == "href") {
                    self.hrefs.push(href.value.to_string());
                }
                TokenSinkResult::Continue
            }
            // Without a tree builder the tokenizer has to be told which
            // elements hold raw text, or `<a>` inside a script would count
            "script" if !tag.self_closing => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" if !tag.self_closing => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "title" | "textarea" if !tag.self_closing => TokenSinkResult::RawData(RawKind::Rcdata),
            _ => TokenSinkResult::Continue,
        }
    }
}

// Raw href values of all anchors, in source order.
// Anchors without an href contribute nothing.
fn collect_hrefs(html: &str) -> Vec<String> {
    let mut input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(AnchorSink::default(), TokenizerOpts::default());
    // The sink never returns `Script`, so feed always runs to the end of input
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.hrefs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://a.test/dir/page.html").unwrap()
    }

    fn resolved(html: &str) -> Vec<String> {
        extract_links(html, &base())
            .filter_map(Result::ok)
            .map(|url| url.to_string())
            .collect()
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = resolved(r#"<a href="https://www.rust-lang.org">Rust</a>"#);
        assert_eq!(links, vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_links() {
        let html = r#"
            <a href="/root">Root</a>
            <a href="sibling.jpg">Sibling</a>
            <a href="../up">Up</a>
            <a href="?q=1">Query</a>
        "#;
        assert_eq!(
            resolved(html),
            vec![
                "http://a.test/root",
                "http://a.test/dir/sibling.jpg",
                "http://a.test/up",
                "http://a.test/dir/page.html?q=1",
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_yields_nothing() {
        let mut links = extract_links(r#"<a name="top">Top</a><a>bare</a>"#, &base());
        assert!(links.next().is_none());
    }

    #[test]
    fn test_first_href_wins() {
        let links = resolved(r#"<a href="/first" href="/second">x</a>"#);
        assert_eq!(links, vec!["http://a.test/first"]);
    }

    #[test]
    fn test_self_closing_anchor() {
        let links = resolved(r#"<p><a href="/closed"/></p>"#);
        assert_eq!(links, vec!["http://a.test/closed"]);
    }

    #[test]
    fn test_other_schemes_are_resolved_not_filtered() {
        let links = resolved(r#"<a href="ftp://a.test/f">f</a><a href="mailto:me@a.test">m</a>"#);
        assert_eq!(links, vec!["ftp://a.test/f", "mailto:me@a.test"]);
    }

    #[test]
    fn test_malformed_href_is_reported_and_skipped() {
        let html = r#"<a href="http://[::1">bad</a><a href="/good">good</a>"#;
        let items: Vec<_> = extract_links(html, &base()).collect();

        assert_eq!(items.len(), 2);
        let err = items[0].as_ref().unwrap_err();
        assert_eq!(err.href, "http://[::1");
        assert_eq!(items[1].as_ref().unwrap().as_str(), "http://a.test/good");
    }

    #[test]
    fn test_non_anchor_elements_ignored() {
        let html = r#"<link href="/style.css"><img src="/i.png"><area href="/map">"#;
        assert!(resolved(html).is_empty());
    }

    #[test]
    fn test_anchor_left_open_across_blocks_counts_once() {
        let html = r#"<p><a href="/x.jpg">one</p><p>two</p><p>three</p>"#;
        let links: Vec<String> = extract_links(html, &Url::parse("http://a.test/").unwrap())
            .filter_map(Result::ok)
            .map(|url| url.to_string())
            .collect();
        assert_eq!(links, vec!["http://a.test/x.jpg"]);
    }

    #[test]
    fn test_anchor_misnested_in_formatting_counts_once() {
        let html = r#"<b><a href="/y.pdf">y</b>after"#;
        let links: Vec<String> = extract_links(html, &Url::parse("http://a.test/").unwrap())
            .filter_map(Result::ok)
            .map(|url| url.to_string())
            .collect();
        assert_eq!(links, vec!["http://a.test/y.pdf"]);
    }

    #[test]
    fn test_anchor_markup_inside_script_and_style_ignored() {
        let html = r#"
            <script>document.write('<a href="/from-script">x</a>');</script>
            <style>a[href="/from-style"] { color: red }</style>
            <title><a href="/from-title"></title>
            <a href="/real">real</a>
        "#;
        assert_eq!(resolved(html), vec!["http://a.test/real"]);
    }

    #[test]
    fn test_uppercase_tag_and_attribute_names() {
        let links = resolved(r#"<A HREF="/shout">x</A>"#);
        assert_eq!(links, vec!["http://a.test/shout"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(resolved("").is_empty());
    }
}
