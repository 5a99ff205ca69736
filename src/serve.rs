//! Development server.
//!
//! A small `tiny_http` server over the build output:
//!
//! - Static file serving with `index.html` resolution for directories
//! - The site's own `404.html` for misses, plain text when there is none
//! - File watching and auto-rebuild (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    resolve_request()       Detect changes
//!    Serve files             Rebuild into output
//! └─────────────────────────────────────────────┘
//!                    │
//!                    ▼
//!            config.build.output
//!              (_site/ dir)
//! ```

use crate::{cli::Cli, config::SiteConfig, log, watch::watch_for_changes_blocking};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Page served for unknown paths when the site ships one.
const NOT_FOUND_PAGE: &str = "404.html";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server with optional file watching.
///
/// Binds to the configured interface and port (moving up on conflict),
/// spawns the watcher when `[serve] watch` is on, and handles requests on
/// the calling thread until Ctrl+C.
pub fn serve_site(cli: &'static Cli, config: &'static SiteConfig) -> Result<()> {
    let interface = config.serve.ip()?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if config.serve.watch {
        let watched = config.clone();
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking(cli, watched) {
                log!("watch"; "{err}");
            }
        });
    }

    let root = &config.build.output;
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, root) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow!(
        "failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// How a request path maps onto the output directory.
#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    /// Serve this file with status 200.
    File(PathBuf),
    /// Serve this file with status 404.
    NotFoundPage(PathBuf),
    /// Plain-text 404.
    NotFound,
}

/// Resolve a raw request URL against `root`.
///
/// Resolution order:
/// 1. Exact file match
/// 2. Directory with `index.html`
/// 3. The site's `404.html`
/// 4. Plain 404
///
/// Paths with `..` segments never leave the root.
fn resolve_request(root: &Path, url: &str) -> Resolved {
    let url_path = urlencoding::decode(url)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    // Cache-busting queries (`style.css?v=2`) address the same file
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let request_path = path.trim_matches('/');

    if !request_path.split('/').any(|segment| segment == "..") {
        let local = root.join(request_path);
        if local.is_file() {
            return Resolved::File(local);
        }
        let index = local.join("index.html");
        if local.is_dir() && index.is_file() {
            return Resolved::File(index);
        }
    }

    let not_found = root.join(NOT_FOUND_PAGE);
    if not_found.is_file() {
        Resolved::NotFoundPage(not_found)
    } else {
        Resolved::NotFound
    }
}

fn handle_request(request: Request, root: &Path) -> Result<()> {
    match resolve_request(root, request.url()) {
        Resolved::File(path) => serve_file(request, &path, StatusCode(200)),
        Resolved::NotFoundPage(path) => serve_file(request, &path, StatusCode(404)),
        Resolved::NotFound => serve_not_found(request),
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

fn content_type_header(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("invalid header value `{value}`"))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path, status: StatusCode) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let response = Response::from_data(content)
        .with_status_code(status)
        .with_header(content_type_header(guess_content_type(path))?);

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type_header("text/plain; charset=utf-8")?],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("webmanifest") => "application/manifest+json",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("blog/first")).unwrap();
        fs::create_dir_all(root.join("css")).unwrap();
        fs::write(root.join("index.html"), "home").unwrap();
        fs::write(root.join("blog/first/index.html"), "post").unwrap();
        fs::write(root.join("css/style.css"), "body{}").unwrap();
        fs::write(root.join("cv 2026.pdf"), "pdf").unwrap();
        dir
    }

    #[test]
    fn test_resolve_files_and_indexes() {
        let dir = site();
        let root = dir.path();

        assert_eq!(resolve_request(root, "/"), Resolved::File(root.join("index.html")));
        assert_eq!(
            resolve_request(root, "/blog/first/"),
            Resolved::File(root.join("blog/first/index.html"))
        );
        assert_eq!(
            resolve_request(root, "/blog/first"),
            Resolved::File(root.join("blog/first/index.html"))
        );
        assert_eq!(
            resolve_request(root, "/css/style.css?v=3"),
            Resolved::File(root.join("css/style.css"))
        );
        assert_eq!(
            resolve_request(root, "/cv%202026.pdf"),
            Resolved::File(root.join("cv 2026.pdf"))
        );
    }

    #[test]
    fn test_resolve_missing() {
        let dir = site();
        let root = dir.path();

        assert_eq!(resolve_request(root, "/nope/"), Resolved::NotFound);
        assert_eq!(resolve_request(root, "/blog/"), Resolved::NotFound);

        fs::write(root.join("404.html"), "lost").unwrap();
        assert_eq!(
            resolve_request(root, "/nope/"),
            Resolved::NotFoundPage(root.join("404.html"))
        );
    }

    #[test]
    fn test_resolve_rejects_parent_segments() {
        let dir = site();
        let inner = dir.path().join("blog");
        assert_eq!(resolve_request(&inner, "/../index.html"), Resolved::NotFound);
        assert_eq!(resolve_request(&inner, "/%2E%2E/index.html"), Resolved::NotFound);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.html")), "text/html; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("feed.xml")), "application/xml; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("me.webp")), "image/webp");
        assert_eq!(guess_content_type(Path::new("CNAME")), "application/octet-stream");
    }
}
