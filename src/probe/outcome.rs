// src/probe/outcome.rs
// =============================================================================
// The result of probing one site, and the rule that classifies it.
//
// Classification:
// - no response at all (timeout, connection failure, ...) -> Offline
// - 200-399                                               -> Online
// - 400-599                                               -> Warning
// - anything else (1xx, >= 600)                           -> Warning
//
// "Warning" means the site answered but is unhealthy. "Offline" means it
// did not answer. The summary counts depend on keeping those apart.
// =============================================================================

use std::fmt;
use std::time::Duration;

/// Health label derived from a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Online,
    Warning,
    Offline,
}

impl Classification {
    /// Classifies a received HTTP status code.
    pub fn from_status(code: u16) -> Self {
        match code {
            200..=399 => Classification::Online,
            // 4xx/5xx: reachable but erroring; anything else: reachable but abnormal
            _ => Classification::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Online => "Online",
            Classification::Warning => "Warning",
            Classification::Offline => "Offline",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a probe did not yield a healthy response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response within the probe timeout
    Timeout,
    /// Transport failed before any response (DNS, refused, reset, TLS)
    ConnectionError,
    /// A response arrived with a 4xx/5xx status
    HttpError,
    /// Any other failure
    Unknown,
}

/// Outcome of one probe attempt. Immutable once built.
///
/// Exactly one of `status_code` / `error_kind` is set, except for 4xx/5xx
/// responses which carry both the code and [`ErrorKind::HttpError`].
///
/// Only [`ProbeOutcome::responded`] and [`ProbeOutcome::failed`] build one.
/// The report file has its own serialized shape (see `report`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    target: String,
    classification: Classification,
    status_code: Option<u16>,
    response_time_ms: Option<f64>,
    error_kind: Option<ErrorKind>,
    message: Option<String>,
}

impl ProbeOutcome {
    /// A response was received after `elapsed`.
    pub fn responded(target: impl Into<String>, status_code: u16, elapsed: Duration) -> Self {
        let error_kind = (400..=599)
            .contains(&status_code)
            .then_some(ErrorKind::HttpError);

        Self {
            target: target.into(),
            classification: Classification::from_status(status_code),
            status_code: Some(status_code),
            response_time_ms: Some(round_ms(elapsed)),
            error_kind,
            message: None,
        }
    }

    /// No response was received. Always Offline.
    pub fn failed(target: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        // HttpError only makes sense next to a status code
        let kind = if kind == ErrorKind::HttpError {
            ErrorKind::Unknown
        } else {
            kind
        };

        Self {
            target: target.into(),
            classification: Classification::Offline,
            status_code: None,
            response_time_ms: None,
            error_kind: Some(kind),
            message: Some(message.into()),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn response_time_ms(&self) -> Option<f64> {
        self.response_time_ms
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Human-readable status used in reports and tables.
    pub fn status_label(&self) -> String {
        match (self.status_code, self.error_kind) {
            (Some(code @ 200..=299), _) => format!("Online ({})", code),
            (Some(code @ 300..=399), _) => format!("Online (Redirect {})", code),
            (Some(code @ 400..=499), _) => format!("Warning (Client Error {})", code),
            (Some(code @ 500..=599), _) => format!("Warning (Server Error {})", code),
            (Some(code), _) => format!("Warning (Unexpected Status {})", code),
            (None, Some(ErrorKind::Timeout)) => "Offline (Timeout)".to_string(),
            (None, Some(ErrorKind::ConnectionError)) => "Offline (Connection Failed)".to_string(),
            (None, _) => "Offline (Error)".to_string(),
        }
    }
}

// Milliseconds with two decimals
fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_is_online() {
        let outcome = ProbeOutcome::responded("https://ok.test", 200, Duration::from_millis(50));
        assert_eq!(outcome.classification(), Classification::Online);
        assert_eq!(outcome.status_code(), Some(200));
        assert_eq!(outcome.response_time_ms(), Some(50.0));
        assert_eq!(outcome.error_kind(), None);
        assert_eq!(outcome.status_label(), "Online (200)");
    }

    #[test]
    fn test_redirect_is_online() {
        let outcome = ProbeOutcome::responded("https://r.test", 301, Duration::ZERO);
        assert_eq!(outcome.classification(), Classification::Online);
        assert_eq!(outcome.status_label(), "Online (Redirect 301)");
    }

    #[test]
    fn test_client_and_server_errors_are_warnings() {
        for code in [404, 500] {
            let outcome = ProbeOutcome::responded("https://err.test", code, Duration::ZERO);
            assert_eq!(outcome.classification(), Classification::Warning);
            assert_eq!(outcome.status_code(), Some(code));
            assert_eq!(outcome.error_kind(), Some(ErrorKind::HttpError));
            assert!(outcome.response_time_ms().is_some());
        }
    }

    #[test]
    fn test_unusual_codes_are_warnings_without_error_kind() {
        for code in [101, 600, 999] {
            let outcome = ProbeOutcome::responded("https://odd.test", code, Duration::ZERO);
            assert_eq!(outcome.classification(), Classification::Warning);
            assert_eq!(outcome.error_kind(), None);
        }
    }

    #[test]
    fn test_failures_are_offline_without_numbers() {
        let outcome = ProbeOutcome::failed("https://slow.test", ErrorKind::Timeout, "timed out");
        assert_eq!(outcome.classification(), Classification::Offline);
        assert_eq!(outcome.status_code(), None);
        assert_eq!(outcome.response_time_ms(), None);
        assert_eq!(outcome.error_kind(), Some(ErrorKind::Timeout));
        assert_eq!(outcome.status_label(), "Offline (Timeout)");
    }

    #[test]
    fn test_http_error_without_status_becomes_unknown() {
        let outcome = ProbeOutcome::failed("https://x.test", ErrorKind::HttpError, "no status");
        assert_eq!(outcome.error_kind(), Some(ErrorKind::Unknown));
        assert_eq!(outcome.classification(), Classification::Offline);
    }

    #[test]
    fn test_response_time_is_rounded() {
        let outcome = ProbeOutcome::responded("https://ok.test", 200, Duration::from_micros(12_346));
        assert_eq!(outcome.response_time_ms(), Some(12.35));
    }
}
