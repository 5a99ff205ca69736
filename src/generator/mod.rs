//! Site-wide generated files: sitemap and feed.

pub mod feed;
pub mod sitemap;

pub use feed::build_feed;
pub use sitemap::build_sitemap;
