//! Robots policy gate.
//!
//! Checks a target URL against the site's `robots.txt` before any
//! extraction runs. The gate fails open: a broken, missing, or unreachable
//! robots.txt never blocks extraction.

use std::time::Duration;

use reqwest::Client;
use texting_robots::Robot;
use tracing::{debug, warn};
use url::Url;

use crate::utils::constants::RAW_FETCH_TIMEOUT_SECS;

/// Check whether `url` may be fetched on behalf of `user_agent`
/// (`"*"` for the generic agent).
///
/// Fetches and parses `<scheme>://<host>/robots.txt`; on any fetch or
/// parse failure this returns `true`.
pub async fn is_allowed(url: &str, user_agent: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return true;
    };
    if parsed.host_str().is_none() {
        return true;
    }
    let Ok(robots_url) = parsed.join("/robots.txt") else {
        return true;
    };

    let client = match Client::builder()
        .timeout(Duration::from_secs(RAW_FETCH_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Robots client build failed: {e}");
            return true;
        }
    };

    let response = match client.get(robots_url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("Robots fetch failed for {robots_url}: {e}");
            return true;
        }
    };

    // A site without a robots.txt (404 and friends) allows everything.
    if !response.status().is_success() {
        debug!("Robots fetch for {robots_url} returned {}", response.status());
        return true;
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Robots body read failed for {robots_url}: {e}");
            return true;
        }
    };

    match Robot::new(user_agent, &body) {
        Ok(robot) => robot.allowed(url),
        Err(e) => {
            debug!("Robots parse failed for {robots_url}: {e}");
            true
        }
    }
}
