// src/error.rs
// =============================================================================
// Run-level errors for the probing core.
//
// These are the errors that REJECT an invocation before any probing starts:
// a malformed target list, configuration outside its allowed range, or an
// HTTP client that cannot be built. Problems with an individual site are
// never errors - they are recorded as data in ProbeOutcome::error_kind.
//
// The binary layer (main.rs) wraps these in anyhow for context and exit codes.
// =============================================================================

use thiserror::Error;

/// Errors returned synchronously to the caller of a probe run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("unsupported scheme '{scheme}' in target '{target}' (expected http or https)")]
    UnsupportedScheme { target: String, scheme: String },

    #[error("duplicate target '{target}' (same site as '{first}')")]
    DuplicateTarget { target: String, first: String },

    #[error("no targets to probe")]
    NoTargets,

    #[error("timeout must be between {min} and {max} seconds, got {value}")]
    TimeoutOutOfRange { value: u64, min: u64, max: u64 },

    #[error("max concurrency must be between {min} and {max}, got {value}")]
    ConcurrencyOutOfRange { value: usize, min: usize, max: usize },

    #[error("invalid proxy url '{url}': {reason}")]
    InvalidProxy { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
