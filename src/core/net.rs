// src/core/net.rs
//
// Rate-limited page fetching. One request in flight at a time, process-wide,
// spaced by SCRAPE_DELAY; failures are retried with linear backoff and then
// downgraded to "no document". Callers must treat None as a silent outcome.

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use log::warn;
use thiserror::Error;

use crate::config::consts::{
    ACCEPT, ACCEPT_LANGUAGE, MAX_RETRIES, REQUEST_TIMEOUT, SCRAPE_DELAY, USER_AGENT,
};

// Fixed-rate limiter bookkeeping, shared across all Fetcher instances in
// this process. Not a token bucket: no burst capacity.
static LAST_FETCH: Mutex<Option<Instant>> = Mutex::new(None);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("transport: {0}")]
    Transport(String),
}

/// The wire seam. Production uses ureq; tests count calls and script
/// failures through this.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .agent
            .get(url)
            .set("Accept", ACCEPT)
            .set("Accept-Language", ACCEPT_LANGUAGE)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => FetchError::Status(code),
                ureq::Error::Transport(t) => FetchError::Transport(t.to_string()),
            })?;
        resp.into_string()
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

pub struct Fetcher {
    transport: Box<dyn Transport>,
    delay: Duration,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_transport(Box::new(UreqTransport::new()), SCRAPE_DELAY)
    }

    pub fn with_transport(transport: Box<dyn Transport>, delay: Duration) -> Self {
        Self { transport, delay }
    }

    /// Fetch one page. Blocks until the rate-limit window has elapsed,
    /// retries up to MAX_RETRIES with linearly growing sleeps, and returns
    /// None once retries are exhausted. "No document" is a valid outcome,
    /// not an error.
    pub fn fetch_page(&self, url: &str) -> Option<String> {
        self.rate_limit();

        for attempt in 1..=MAX_RETRIES {
            match self.transport.get(url) {
                Ok(body) => return Some(body),
                Err(e) => {
                    warn!("attempt {attempt} failed for {url}: {e}");
                    if attempt < MAX_RETRIES {
                        thread::sleep(self.delay * attempt);
                    }
                }
            }
        }
        None
    }

    fn rate_limit(&self) {
        let mut last = LAST_FETCH.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(t) = *last {
            let elapsed = t.elapsed();
            if elapsed < self.delay {
                thread::sleep(self.delay - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Scripted {
        calls: RefCell<u32>,
        succeed_on: Option<u32>,
    }

    impl Scripted {
        fn failing() -> Self {
            Self { calls: RefCell::new(0), succeed_on: None }
        }
        fn succeeding_on(n: u32) -> Self {
            Self { calls: RefCell::new(0), succeed_on: Some(n) }
        }
    }

    impl Transport for &Scripted {
        fn get(&self, _url: &str) -> Result<String, FetchError> {
            *self.calls.borrow_mut() += 1;
            match self.succeed_on {
                Some(n) if *self.calls.borrow() >= n => Ok(s!("<html></html>")),
                _ => Err(FetchError::Status(503)),
            }
        }
    }

    fn fetcher(t: &'static Scripted) -> Fetcher {
        Fetcher::with_transport(Box::new(t), Duration::ZERO)
    }

    #[test]
    fn exhausted_retries_yield_none() {
        let t: &'static Scripted = Box::leak(Box::new(Scripted::failing()));
        let f = fetcher(t);
        assert_eq!(f.fetch_page("http://x.test/roster"), None);
        assert_eq!(*t.calls.borrow(), MAX_RETRIES);
    }

    #[test]
    fn success_on_first_attempt_stops_there() {
        let t: &'static Scripted = Box::leak(Box::new(Scripted::succeeding_on(1)));
        let f = fetcher(t);
        assert!(f.fetch_page("http://x.test/roster").is_some());
        assert_eq!(*t.calls.borrow(), 1);
    }

    #[test]
    fn success_on_last_attempt_returns_body() {
        let t: &'static Scripted = Box::leak(Box::new(Scripted::succeeding_on(MAX_RETRIES)));
        let f = fetcher(t);
        assert!(f.fetch_page("http://x.test/roster").is_some());
        assert_eq!(*t.calls.borrow(), MAX_RETRIES);
    }
}
