// src/config.rs
// =============================================================================
// Validated probe settings.
//
// The core consumes exactly two tunables from its caller:
// - timeout_seconds: 5..=30, bounds every single probe
// - max_concurrency: 1..=10, bounds simultaneous in-flight probes
//
// Values outside these ranges are REJECTED (not clamped) so a typo on the
// command line never silently turns into a different run.
// =============================================================================

use std::time::Duration;

use crate::error::{Error, Result};

pub const MIN_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const MIN_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 10;
pub const DEFAULT_CONCURRENCY: usize = 5;

pub const DEFAULT_USER_AGENT: &str = "Website Status Checker 1.0";

/// Everything the HTTP prober and the coordinator need for one run.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    timeout: Duration,
    max_concurrency: usize,
    user_agent: String,
    insecure: bool,
    proxy: Option<String>,
}

impl ProbeSettings {
    /// Validates the two bounded tunables and fills the rest with defaults.
    pub fn new(timeout_secs: u64, max_concurrency: usize) -> Result<Self> {
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(Error::TimeoutOutOfRange {
                value: timeout_secs,
                min: MIN_TIMEOUT_SECS,
                max: MAX_TIMEOUT_SECS,
            });
        }

        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&max_concurrency) {
            return Err(Error::ConcurrencyOutOfRange {
                value: max_concurrency,
                min: MIN_CONCURRENCY,
                max: MAX_CONCURRENCY,
            });
        }

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            max_concurrency,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            insecure: false,
            proxy: None,
        })
    }

    /// Skip TLS certificate verification (self-signed or expired certs still count as reachable).
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Route probes through an explicit proxy. Without one, proxy env vars are ignored.
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn insecure(&self) -> bool {
        self.insecure
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrency: DEFAULT_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            insecure: false,
            proxy: None,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why reject instead of clamp?
//    - "--timeout 60" silently becoming 30 would hide a typo
//    - The error names the allowed range, so the fix is obvious
//
// 2. What is the with_* pattern?
//    - Each method takes `self` by value and returns it changed
//    - Calls chain: ProbeSettings::new(10, 5)?.with_insecure(true)
// -----------------------------------------------------------------------------
