//! RSS 2.0 feed of the blog collection.
//!
//! Only dated posts are included; the feed link and item links are
//! absolute, so `[base.url]` is required (checked by config validation).

use crate::{
    config::SiteConfig,
    data::PageData,
    log,
    utils::{
        date::{parse_date, to_rfc2822},
        minify::{MinifyType, minify},
    },
};
use anyhow::{Context, Result, anyhow};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, sync::LazyLock};

/// Build the feed if enabled in config.
pub fn build_feed(config: &SiteConfig, posts: &[PageData]) -> Result<()> {
    if config.build.feed.enable {
        let xml = feed_xml(config, posts)?;
        let xml = minify(MinifyType::Xml, xml.as_bytes(), config.build.minify);

        let path = &config.build.feed.path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &*xml)
            .with_context(|| format!("failed to write feed to {}", path.display()))?;

        log!("feed"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    }
    Ok(())
}

/// Channel XML for `posts`, in the order given (newest first).
fn feed_xml(config: &SiteConfig, posts: &[PageData]) -> Result<String> {
    let base = &config.base;
    let link = base
        .url
        .clone()
        .ok_or_else(|| anyhow!("[base.url] is required for feed generation"))?;

    let items: Vec<rss::Item> = posts
        .iter()
        .filter_map(|post| post_to_item(post, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&base.title)
        .link(link)
        .description(&base.description)
        .language(base.language.clone())
        .copyright((!base.copyright.is_empty()).then(|| base.copyright.clone()))
        .managing_editor(feed_author(config))
        .generator(format!("folio {}", env!("CARGO_PKG_VERSION")))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

/// Convert a post to an item. Posts without a date are skipped.
fn post_to_item(post: &PageData, config: &SiteConfig) -> Option<rss::Item> {
    let date = parse_date(post.date.as_deref()?)?;
    let link = config.base.absolute_url(&post.url)?;

    Some(
        ItemBuilder::default()
            .title(post.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(post.description.clone())
            .pub_date(to_rfc2822(date))
            .author(feed_author(config))
            .categories(
                post.tags
                    .iter()
                    .map(|tag| rss::CategoryBuilder::default().name(tag.clone()).build())
                    .collect::<Vec<_>>(),
            )
            .build(),
    )
}

/// RSS author form: `email@example.com (Name)`.
///
/// Uses `[base.author]` as-is when it already has that form, otherwise
/// combines `[base.email]` and `[base.author]`.
fn feed_author(config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("valid author regex")
    });

    let author = config.base.author.trim();
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.to_string());
    }
    if config.base.email.is_empty() {
        return None;
    }
    Some(format!("{} ({})", config.base.email, author))
}
