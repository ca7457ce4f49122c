//! Shared configuration constants for pagesift
//!
//! Default values used throughout the fetch and extraction paths. The wait
//! constants are fixed by design: the fetcher never backs off adaptively
//! and never retries.

/// Chrome user agent string reported by the rendering browser.
///
/// A current-stable Chrome UA keeps sites from serving the degraded
/// "unknown bot" variants of their pages.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Hard cap on initial page navigation: 40 seconds.
pub const NAVIGATION_TIMEOUT_SECS: u64 = 40;

/// Cap on waiting for the DOM content-loaded milestone and a `<body>`
/// element to appear: 10 seconds.
pub const BODY_WAIT_TIMEOUT_SECS: u64 = 10;

/// Fixed settle delay after load so deferred and lazy script-driven
/// content can land before the DOM is serialized: 5 seconds.
pub const SETTLE_DELAY_MS: u64 = 5000;

/// Timeout for plain (non-rendered) HTTP fetches: robots.txt and the
/// clean-text raw fallback.
pub const RAW_FETCH_TIMEOUT_SECS: u64 = 10;

/// Minimum character count for a readability result to be accepted before
/// falling through to the raw paragraph fallback.
pub const MIN_ARTICLE_CHARS: usize = 50;
