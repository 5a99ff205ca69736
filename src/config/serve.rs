//! `[serve]`: the local preview of the portfolio.
//!
//! `folio serve` builds into the output directory and serves it. Unless
//! `--base-url` is given, `base.url` is pointed at [`ServeConfig::preview_url`]
//! for the session, so feed and sitemap links stay on the preview host.

use super::{ConfigError, defaults};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// `[serve]` section in folio.toml.
///
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # check the layout from a phone on the same network
/// port = 4000
/// watch = true           # rebuild pages, `_data` and `watch_targets` on save
/// ```
///
/// Each key can be overridden per run: `folio serve --interface 0.0.0.0 -p 4000 --watch false`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Address to listen on; loopback unless the preview should be
    /// reachable from other devices.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// First port tried; taken ports move the server up.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}

impl ServeConfig {
    pub fn ip(&self) -> Result<IpAddr, ConfigError> {
        self.interface.trim().parse().map_err(|_| {
            ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.interface
            ))
        })
    }

    /// Base URL for links while previewing.
    ///
    /// A wildcard interface is reached as `localhost`.
    pub fn preview_url(&self) -> String {
        let host = match self.ip() {
            Ok(ip) if ip.is_unspecified() => "localhost".to_string(),
            Ok(IpAddr::V6(ip)) => format!("[{ip}]"),
            Ok(IpAddr::V4(ip)) => ip.to_string(),
            Err(_) => self.interface.trim().to_string(),
        };
        format!("http://{host}:{}", self.port)
    }
}
