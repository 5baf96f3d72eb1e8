// src/probe/mod.rs
// =============================================================================
// This module probes a single site.
//
// Submodules:
// - outcome: ProbeOutcome, Classification, ErrorKind
// - http: The reqwest-based prober used in production
//
// The Prober trait is the seam between "how do we reach a site" and "how do
// we schedule many of them". The coordinator only knows about the trait, so
// tests can drive it with scripted probers that never touch the network.
// =============================================================================

mod http;
mod outcome;

use async_trait::async_trait;
use std::time::Duration;

use crate::targets::Target;

pub use http::HttpProber;
pub use outcome::{Classification, ErrorKind, ProbeOutcome};

/// Performs one probe against one target.
///
/// Implementations must never fail: every problem with the site is reported
/// inside the returned [`ProbeOutcome`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome;
}
