//! Rendering fetcher: JS-rendered DOM snapshots via headless Chromium.
//!
//! One isolated browser instance per call — launched, used exclusively, and
//! torn down before returning. No pooling, no session reuse, no retries,
//! and no caching across calls. Any launch, navigation, or timeout failure
//! degrades to `None`; the fetcher never raises to the caller.

use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser_setup::launch_browser;
use crate::config::FetchConfig;

/// Distinguishes profile directories of concurrent fetches within one
/// process.
static SESSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Probe for the DOM content-loaded milestone: parsing finished and a
/// `<body>` element exists. Deliberately not network idle.
const DOM_READY_PROBE: &str = r#"
    (function() {
        return {
            readyState: document.readyState,
            bodyExists: document.body !== null
        };
    })()
"#;

/// A browser bound to one fetch call.
///
/// `shutdown` must run on every exit path: close the browser, wait for the
/// process to exit, stop the CDP handler task, remove the profile
/// directory. `Drop` is the backstop — it aborts the handler and removes
/// the profile dir, leaving the Chrome process to `Browser::drop`.
struct BrowserSession {
    browser: Browser,
    handler: Option<JoinHandle<()>>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserSession {
    async fn launch(config: &FetchConfig) -> Result<Self> {
        let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
        let user_data_dir = std::env::temp_dir().join(format!(
            "pagesift_chrome_{}_{seq}",
            std::process::id()
        ));

        let (browser, handler) = launch_browser(config, &user_data_dir).await?;

        Ok(Self {
            browser,
            handler: Some(handler),
            user_data_dir: Some(user_data_dir),
        })
    }

    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
        }
        // Wait for the process to fully exit before removing its profile
        // directory; Chrome holds file locks until then.
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        if let Some(dir) = self.user_data_dir.take()
            && let Err(e) = std::fs::remove_dir_all(&dir)
        {
            warn!("Failed to clean up profile directory {}: {e}", dir.display());
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        if let Some(dir) = self.user_data_dir.take() {
            let _ = std::fs::remove_dir_all(&dir);
        }
    }
}

/// Fetch `url` fully rendered with the default configuration.
pub async fn fetch_rendered(url: &str) -> Option<String> {
    fetch_rendered_with(url, &FetchConfig::default()).await
}

/// Fetch `url` in an isolated headless browser and return the DOM
/// serialization after JavaScript execution and the fixed settle delay.
///
/// Returns `None` on any launch, navigation, or timeout failure. The
/// browser is torn down on every exit path.
pub async fn fetch_rendered_with(url: &str, config: &FetchConfig) -> Option<String> {
    let session = match BrowserSession::launch(config).await {
        Ok(session) => session,
        Err(e) => {
            warn!("Browser launch failed: {e:#}");
            return None;
        }
    };

    let html = match render_page(&session.browser, url, config).await {
        Ok(html) => {
            info!("Rendered {url} ({} bytes)", html.len());
            Some(html)
        }
        Err(e) => {
            warn!("Rendered fetch failed for {url}: {e:#}");
            None
        }
    };

    session.shutdown().await;
    html
}

/// Navigate and serialize one page. Every wait is bounded by a fixed
/// constant from the fetch configuration.
async fn render_page(browser: &Browser, url: &str, config: &FetchConfig) -> Result<String> {
    let page = browser
        .new_page("about:blank")
        .await
        .context("Failed to create page")?;

    with_timeout(
        async {
            page.goto(url)
                .await
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!("{e}"))
        },
        config.navigation_timeout,
        "Page navigation",
    )
    .await?;

    wait_for_dom_content(&page, config.body_wait_timeout).await?;

    // Fixed extra wait for deferred and lazy JS-loaded content.
    tokio::time::sleep(config.settle_delay).await;

    page.content()
        .await
        .context("Failed to serialize rendered DOM")
}

/// Wrap an async page operation with an explicit timeout, so a hung
/// navigation can never stall a fetch indefinitely.
async fn with_timeout<F, T>(operation: F, limit: Duration, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {} seconds",
            limit.as_secs()
        )),
    }
}

/// Poll until the document has parsed past `loading` and a `<body>`
/// element exists, or fail once `limit` elapses.
async fn wait_for_dom_content(page: &Page, limit: Duration) -> Result<()> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        if start.elapsed() >= limit {
            return Err(anyhow::anyhow!(
                "Timed out waiting for document body after {} seconds",
                limit.as_secs()
            ));
        }

        match page.evaluate(DOM_READY_PROBE).await {
            Ok(result) => {
                if let Ok(value) = result.into_value::<serde_json::Value>() {
                    let ready_state = value
                        .get("readyState")
                        .and_then(|v| v.as_str())
                        .unwrap_or("loading");
                    let body_exists = value
                        .get("bodyExists")
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false);

                    if ready_state != "loading" && body_exists {
                        debug!(
                            "DOM content loaded after {:.2}s",
                            start.elapsed().as_secs_f64()
                        );
                        return Ok(());
                    }
                }
            }
            Err(e) => {
                debug!("DOM readiness probe failed: {e}, retrying");
            }
        }

        tokio::time::sleep(poll_interval).await;
    }
}
