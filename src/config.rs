//! Fetch configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::constants::{
    BODY_WAIT_TIMEOUT_SECS, CHROME_USER_AGENT, NAVIGATION_TIMEOUT_SECS, SETTLE_DELAY_MS,
};

/// Configuration for one rendered fetch.
///
/// Defaults carry the fixed wait constants; there is no adaptive backoff
/// and no retry anywhere in the fetch path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User agent the browser reports.
    pub user_agent: String,
    /// Hard cap on initial navigation.
    pub navigation_timeout: Duration,
    /// Cap on waiting for the content-loaded milestone and a `<body>`.
    pub body_wait_timeout: Duration,
    /// Fixed delay after load for deferred script-driven content.
    pub settle_delay: Duration,
    /// Run the browser headless.
    pub headless: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: CHROME_USER_AGENT.to_string(),
            navigation_timeout: Duration::from_secs(NAVIGATION_TIMEOUT_SECS),
            body_wait_timeout: Duration::from_secs(BODY_WAIT_TIMEOUT_SECS),
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            headless: true,
        }
    }
}
