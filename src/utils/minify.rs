//! Output minification.
//!
//! HTML pages go through `minify_html`; XML (sitemap, feed) only loses its
//! indentation. Everything else is written untouched.

use std::{borrow::Cow, path::Path};

/// Content type for minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinifyType {
    Html,
    Xml,
}

impl MinifyType {
    /// Pick the minifier for an output file by extension.
    pub fn for_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "html" | "htm" => Some(Self::Html),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }
}

/// Minify `content` when `enabled`; otherwise borrow it back.
pub fn minify(kind: MinifyType, content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(content);
    }
    match kind {
        MinifyType::Html => Cow::Owned(minify_html_bytes(content)),
        MinifyType::Xml => Cow::Owned(minify_xml_bytes(content)),
    }
}

fn minify_html_bytes(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

fn minify_xml_bytes(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<String>()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_path() {
        assert_eq!(MinifyType::for_path(Path::new("a/index.html")), Some(MinifyType::Html));
        assert_eq!(MinifyType::for_path(Path::new("sitemap.xml")), Some(MinifyType::Xml));
        assert_eq!(MinifyType::for_path(Path::new("css/style.css")), None);
        assert_eq!(MinifyType::for_path(Path::new("CNAME")), None);
    }

    #[test]
    fn test_disabled_borrows() {
        let html = b"<p>  hello  </p>";
        assert!(matches!(minify(MinifyType::Html, html, false), Cow::Borrowed(_)));
    }

    #[test]
    fn test_minify_html_shrinks() {
        let html = b"<html>\n  <body>\n    <!-- note -->\n    <p>Hello</p>\n  </body>\n</html>";
        let out = minify(MinifyType::Html, html, true);
        let out = String::from_utf8_lossy(&out);
        assert!(out.len() < html.len());
        assert!(out.contains("<p>Hello</p>"));
        assert!(!out.contains("note"));
    }

    #[test]
    fn test_minify_xml_drops_indentation() {
        let xml = b"<urlset>\n\n  <url>\n    <loc>https://x.dev/</loc>\n  </url>\n</urlset>\n";
        let out = minify(MinifyType::Xml, xml, true);
        assert_eq!(&*out, b"<urlset><url><loc>https://x.dev/</loc></url></urlset>");
    }
}
