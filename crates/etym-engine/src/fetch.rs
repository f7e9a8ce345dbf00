//! Page fetching. Transport failures are recovered locally as "no page";
//! nothing here returns an error to the caller.

use std::time::Duration;

/// Browser user-agent sent with every request. The source site serves a
/// reduced page to obvious bots.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Pluggable page source. Implementations return the raw document for a
/// URL, or `None` when it cannot be retrieved for any reason.
pub trait PageFetcher {
    fn fetch_page(&self, url: &str) -> Option<String>;

    /// Human-readable backend name (for logging).
    fn name(&self) -> &str;
}

/// HTTP fetcher over a shared ureq agent with a global per-call timeout.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_page(&self, url: &str) -> Option<String> {
        // Timeouts, connection failures and non-2xx statuses all land in
        // the Err arm; each is "no page", never a propagated error.
        match self.agent.get(url).call() {
            Ok(mut response) => match response.body_mut().read_to_string() {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::warn!("failed to read body from {}: {}", url, e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("fetch failed for {}: {}", url, e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
