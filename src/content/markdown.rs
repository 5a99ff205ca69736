//! Markdown to HTML via `pulldown-cmark`.
//!
//! Three switches from `[build.markdown]` shape the event stream before it
//! is rendered:
//!
//! | Option | Effect |
//! |--------|--------|
//! | `html` | raw HTML passes through (off: escaped as text) |
//! | `breaks` | soft line breaks become `<br />` |
//! | `linkify` | bare `http(s)://` URLs in text become links |

use crate::config::MarkdownConfig;
use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use regex::Regex;
use std::sync::LazyLock;

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'`]+"#).expect("valid url regex"));

/// Render Markdown to an HTML fragment.
pub fn render_markdown(source: &str, config: MarkdownConfig) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let events = TextMergeStream::new(Parser::new_ext(source, options)).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) if !config.html => Event::Text(raw),
        Event::SoftBreak if config.breaks => Event::HardBreak,
        other => other,
    });

    let events: Vec<Event<'_>> = if config.linkify {
        linkify(events)
    } else {
        events.collect()
    };

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Wrap bare URLs in text events with autolinks, outside links and code.
fn linkify<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(Tag::Link { .. }) => {
                link_depth += 1;
                out.push(event);
            }
            Event::End(TagEnd::Link) => {
                link_depth = link_depth.saturating_sub(1);
                out.push(event);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push(event);
            }
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                split_urls(&text, &mut out);
            }
            other => out.push(other),
        }
    }
    out
}

fn split_urls<'a>(text: &str, out: &mut Vec<Event<'a>>) {
    let mut last = 0;
    for m in RE_URL.find_iter(text) {
        let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
        if url.len() <= "https://".len() {
            continue;
        }
        let start = m.start();
        if start > last {
            out.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(url.to_string()),
            title: CowStr::from(""),
            id: CowStr::from(""),
        }));
        out.push(Event::Text(CowStr::from(url.to_string())));
        out.push(Event::End(TagEnd::Link));
        last = start + url.len();
    }
    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(html: bool, breaks: bool, linkify: bool) -> MarkdownConfig {
        MarkdownConfig { html, breaks, linkify }
    }

    #[test]
    fn test_basic_markdown() {
        let out = render_markdown("# Hi\n\nSome *text*.", MarkdownConfig::default());
        assert!(out.contains("<h1>Hi</h1>"));
        assert!(out.contains("<em>text</em>"));
    }

    #[test]
    fn test_raw_html_allowed() {
        let out = render_markdown("<div class=\"x\">hi</div>\n", config(true, false, false));
        assert!(out.contains("<div class=\"x\">hi</div>"));
    }

    #[test]
    fn test_raw_html_escaped() {
        let out = render_markdown("a <b>bold</b> word\n", config(false, false, false));
        assert!(out.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn test_breaks() {
        let out = render_markdown("line one\nline two\n", config(true, true, false));
        assert!(out.contains("line one<br />"));

        let out = render_markdown("line one\nline two\n", config(true, false, false));
        assert!(!out.contains("<br />"));
    }

    #[test]
    fn test_linkify() {
        let out = render_markdown("See https://example.com/docs. Thanks\n", config(true, false, true));
        assert!(out.contains("<a href=\"https://example.com/docs\">https://example.com/docs</a>."));
        assert!(out.contains("See "));
        assert!(out.contains(" Thanks"));
    }

    #[test]
    fn test_linkify_skips_links_and_code() {
        let source = "[https://a.dev](https://a.dev)\n\n```\nhttps://b.dev\n```\n\n`https://c.dev`\n";
        let out = render_markdown(source, config(true, false, true));
        assert_eq!(out.matches("<a href").count(), 1);
        assert!(out.contains("<code>https://c.dev</code>"));
    }

    #[test]
    fn test_linkify_disabled() {
        let out = render_markdown("go to https://example.com\n", config(true, false, false));
        assert!(!out.contains("<a "));
    }
}
