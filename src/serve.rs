//! Page server.
//!
//! A lightweight HTTP server built on `tiny_http`:
//!
//! - Requests run on a bounded pool of blocking workers
//! - Each configured route renders one page instance per request
//! - User-Agent and Accept-Language headers are the page's runtime signals
//! - Routes with an artificial delay stream the loading block first, then
//!   the ready block, over a chunked response
//! - Badge images are served from the assets directory or the embedded copies
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐   spawn_blocking    ┌──────────────────┐
//! │   Main Thread   │ ──────────────────► │  Worker (≤ N)    │
//! │  (HTTP accept)  │                     │ (render/stream)  │
//! └─────────────────┘                     └────────┬─────────┘
//!                                                  │ block_on(ready)
//!                                                  ▼
//!                                         ┌──────────────────┐
//!                                         │  tokio runtime   │
//!                                         │  (delay timers)  │
//!                                         └──────────────────┘
//! ```

use crate::{
    assets::{Badge, guess_content_type},
    config::{RouteConfig, SiteConfig},
    i18n::Translations,
    locale::{Locale, primary_language},
    log,
    page::{PageController, PageState, Signals},
    render::RenderContext,
    utils::minify::minify_html,
};
use anyhow::{Context, Result, anyhow, bail};
use chunked_transfer::Encoder;
use std::{
    borrow::Cow,
    io::{Cursor, Write},
    net::{IpAddr, SocketAddr},
    path::Path,
    sync::Arc,
    time::Duration,
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tokio::runtime::{Builder, Handle, Runtime};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Grace period for in-flight timers when the server stops.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200);

/// Shared, read-only state for request workers.
struct Site {
    config: SiteConfig,
    translations: Translations,
    runtime: Handle,
}

impl Site {
    fn new(config: &SiteConfig, runtime: Handle) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            translations: config.translations()?,
            runtime,
        })
    }
}

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the page server.
///
/// This function:
/// 1. Binds to the configured interface and port (with auto-retry on port conflict)
/// 2. Starts the runtime that drives page timers and request workers
/// 3. Sets up Ctrl+C handler for graceful shutdown
/// 4. Enters the request accept loop, handing each request to a worker
///
/// The server blocks until Ctrl+C is received.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: IpAddr = config.serve.interface.parse()?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let runtime = page_runtime(config.serve.workers)?;
    let site = Arc::new(Site::new(config, runtime.handle().clone())?);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);
    for locale in Locale::ALL {
        if !site.translations.contains(locale) {
            log!("i18n"; "no `{}` strings, falling back to english", locale);
        }
    }
    for route in &config.routes {
        log!(
            "serve";
            "{} (localized: {}, delay: {}ms)",
            route.path, route.localized, route.delay_ms
        );
    }

    for request in server.incoming_requests() {
        dispatch(request, &site);
    }

    // Dropping the runtime aborts any timer still pending.
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    Ok(())
}

/// Runtime for page timers. Its blocking pool, capped at `workers` threads,
/// runs the requests themselves.
fn page_runtime(workers: usize) -> Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(2)
        .max_blocking_threads(workers)
        .thread_name("appbadge-worker")
        .enable_time()
        .build()
        .context("Failed to start page runtime")
}

/// Queue `request` on the worker pool.
///
/// Once every worker is busy, requests wait in the pool queue instead of
/// each getting a thread of its own.
fn dispatch(request: Request, site: &Arc<Site>) {
    let worker = Arc::clone(site);
    site.runtime.spawn_blocking(move || {
        if let Err(e) = handle_request(request, &worker) {
            log!("serve"; "request error: {e:#}");
        }
    });
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
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
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Request resolution order:
/// 1. Configured route → render page
/// 2. Badge image path → serve image
/// 3. Nothing found → 404
fn handle_request(request: Request, site: &Site) -> Result<()> {
    if *request.method() != Method::Get {
        return serve_status(request, 405, "405 Method Not Allowed");
    }

    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(request.url())
        .map(Cow::into_owned)
        .unwrap_or_default();

    // Strip query string before resolving path
    let path = url_path.split('?').next().unwrap_or(&url_path);

    if let Some(route) = site.config.route(path) {
        return serve_page(request, site, route);
    }

    if let Some(badge) = Badge::lookup(&site.config, path) {
        let content = badge.load(&site.config.build.assets)?;
        let content_type = guess_content_type(Path::new(badge.file_name));
        return serve_data(request, content.into_owned(), content_type);
    }

    serve_status(request, 404, "404 Not Found")
}

/// Read the page's runtime signals from request headers.
fn signals_from(request: &Request) -> Signals {
    let header = |name: &'static str| {
        request
            .headers()
            .iter()
            .find(|h| h.field.equiv(name))
            .map(|h| h.value.as_str())
            .unwrap_or_default()
    };

    Signals::new(
        header("User-Agent"),
        primary_language(header("Accept-Language")),
    )
}

/// Run one page instance for this request and send its markup.
fn serve_page(request: Request, site: &Site, route: &RouteConfig) -> Result<()> {
    let ctx = RenderContext::for_route(route, &site.translations, &site.config.stores);
    let mut page = PageController::new(ctx.options, site.runtime.clone());
    page.mount(&signals_from(&request));

    let state = page.state();
    if state.is_ready() {
        log!("page"; "{} → {} / {}", route.path, state.platform, state.locale);
        page.teardown();
        let html = ctx.render_page(&state);
        let html = minify_html(html.as_bytes(), &site.config);
        return serve_data(request, html.into_owned(), "text/html; charset=utf-8");
    }

    let version = request.http_version();
    if (version.0, version.1) < (1, 1) {
        // No chunked encoding before HTTP/1.1: wait and send the final page.
        let Some(state) = site.runtime.block_on(page.ready()) else {
            bail!("page {} torn down before it became ready", route.path);
        };
        let html = ctx.render_page(&state);
        let html = minify_html(html.as_bytes(), &site.config);
        return serve_data(request, html.into_owned(), "text/html; charset=utf-8");
    }

    stream_page(request, &ctx, page, state, &site.runtime, &route.path)
}

/// Stream the loading block, wait for the transition, then stream the ready block.
///
/// `initial` is the snapshot the caller found still loading; the timer may
/// have fired since, so the controller is not read again for it.
///
/// Any write error (client gone) returns early and drops `page`, which
/// cancels its pending transition.
fn stream_page(
    request: Request,
    ctx: &RenderContext<'_>,
    page: PageController,
    initial: PageState,
    runtime: &Handle,
    path: &str,
) -> Result<()> {
    let mut body = ChunkedBody::start(request.into_writer(), "text/html; charset=utf-8")?;
    body.chunk(ctx.document_head(&initial).as_bytes())?;
    body.chunk(ctx.render_loading(&initial).as_bytes())?;

    if page.is_pending() {
        log!("page"; "{} loading for {}ms", path, ctx.options.artificial_delay.as_millis());
    }
    let Some(state) = runtime.block_on(page.ready()) else {
        bail!("page {path} torn down before it became ready");
    };
    log!("page"; "{} → {} / {}", path, state.platform, state.locale);

    body.chunk(ctx.hide_loading().as_bytes())?;
    body.chunk(ctx.render_ready(&state).as_bytes())?;
    body.chunk(ctx.document_tail().as_bytes())?;
    page.teardown();
    body.finish();
    Ok(())
}

// ============================================================================
// Response Helpers
// ============================================================================

fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field, value).map_err(|()| anyhow!("invalid header `{field}: {value}`"))
}

/// Serve a complete body with the given content type.
fn serve_data(request: Request, content: Vec<u8>, content_type: &str) -> Result<()> {
    let response = Response::from_data(content)
        .with_header(header("Content-Type", content_type)?)
        .with_header(header("Cache-Control", "no-store")?);
    request.respond(response)?;
    Ok(())
}

/// Serve a plain-text status response.
fn serve_status(request: Request, code: u16, message: &str) -> Result<()> {
    let response = Response::new(
        StatusCode(code),
        vec![header("Content-Type", "text/plain")?],
        Cursor::new(message.as_bytes().to_vec()),
        Some(message.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// `Transfer-Encoding: chunked` response that flushes every block.
///
/// `tiny_http` buffers chunked bodies, so the loading block would not reach
/// the browser until the page is ready. Only the status line and headers are
/// written by hand; the body goes through an encoder that emits one chunk
/// per write.
struct ChunkedBody {
    encoder: Encoder<Box<dyn Write + Send>>,
}

impl ChunkedBody {
    fn start(mut writer: Box<dyn Write + Send>, content_type: &str) -> Result<Self> {
        write!(
            writer,
            "HTTP/1.1 200 OK\r\n\
             Content-Type: {content_type}\r\n\
             Cache-Control: no-store\r\n\
             Transfer-Encoding: chunked\r\n\
             Connection: close\r\n\
             \r\n"
        )?;
        writer.flush()?;
        Ok(Self {
            encoder: Encoder::with_flush_after_write(writer),
        })
    }

    fn chunk(&mut self, data: &[u8]) -> Result<()> {
        // An empty chunk would terminate the body.
        if data.is_empty() {
            return Ok(());
        }
        self.encoder.write_all(data)?;
        Ok(())
    }

    /// Write the terminating chunk.
    fn finish(self) {
        drop(self.encoder);
    }
}

// ============================================================================
// Tests
// ============================================================================
