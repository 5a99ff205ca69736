//! folio: static site generator and page interaction model for a personal
//! portfolio.
//!
//! - Builder: [`build::build_site`] renders `src/` into `_site/`
//! - Dev server: [`serve::serve_site`] with rebuild-on-change via [`watch`]
//! - Interaction layer: [`page::PageController`], driven by a host

pub mod assets;
pub mod build;
pub mod cli;
pub mod config;
pub mod content;
pub mod data;
pub mod generator;
pub mod init;
pub mod logger;
pub mod page;
pub mod render;
pub mod serve;
pub mod utils;
pub mod watch;
