// src/probe/http.rs
// =============================================================================
// This module checks if a site is reachable by making one HTTP request.
//
// Key behavior:
// - Always a GET (some servers answer HEAD differently from GET)
// - Follows up to 10 redirects; the final status is what gets classified
// - Latency is measured from dispatch until the status line and headers
//   arrive. The body is never downloaded.
// - The whole request (connect + headers) is bounded by the probe timeout
// - Never returns an error: failures become Offline outcomes
//
// Error mapping (reqwest -> ErrorKind):
// - deadline elapsed / reqwest timeout -> Timeout
// - redirect limit hit -> Unknown
// - connect / send failure (DNS, refused, reset, hang-up, TLS) -> ConnectionError
// - anything else (builder error, ...) -> Unknown
// =============================================================================

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::error::Error as StdError;
use std::time::{Duration, Instant};

use super::{ErrorKind, ProbeOutcome, Prober};
use crate::config::ProbeSettings;
use crate::error::{Error, Result};
use crate::targets::Target;

const MAX_REDIRECTS: usize = 10;

/// Production prober backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    // Client is cheap to clone (Arc inside) and pools connections
    client: Client,
}

impl HttpProber {
    /// Builds the HTTP client once per run.
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(settings.user_agent())
            .redirect(Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(settings.insecure());

        builder = match settings.proxy() {
            Some(proxy_url) => {
                let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| Error::InvalidProxy {
                    url: proxy_url.to_string(),
                    reason: e.to_string(),
                })?;
                log::debug!("probing through proxy {}", proxy_url);
                builder.proxy(proxy)
            }
            // Don't let HTTP_PROXY & co. decide whether a site looks online
            None => builder.no_proxy(),
        };

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        // Nothing is sent until the future is polled below
        let request = self.client.get(target.url().clone()).send();

        // Clock starts at dispatch and stops when the headers are in
        let started = Instant::now();
        let result = tokio::time::timeout(timeout, request).await;
        let elapsed = started.elapsed();

        // The response (and its connection) is dropped right here; we only
        // needed the status line.
        let outcome = match result {
            Ok(Ok(response)) => {
                ProbeOutcome::responded(target.as_str(), response.status().as_u16(), elapsed)
            }
            Ok(Err(e)) => categorize_error(target, &e),
            Err(_) => ProbeOutcome::failed(
                target.as_str(),
                ErrorKind::Timeout,
                format!("no response within {:?}", timeout),
            ),
        };

        log::debug!(
            "probed {} -> {} in {:.2}ms",
            target,
            outcome.status_label(),
            elapsed.as_secs_f64() * 1000.0
        );

        outcome
    }
}

// Turns a reqwest error into an Offline outcome
//
// A reqwest error here always means no response arrived: a status code,
// even 500, comes back as Ok(response) above.
fn categorize_error(target: &Target, error: &reqwest::Error) -> ProbeOutcome {
    // reqwest's Display already carries the source chain
    // ("error sending request for url (...): error trying to connect: ...")
    let text = error.to_string();

    let (kind, message) = if error.is_timeout() {
        (ErrorKind::Timeout, "request timed out".to_string())
    } else if error.is_redirect() {
        (ErrorKind::Unknown, "too many redirects".to_string())
    } else if error.is_connect() || error.is_request() || has_io_source(error) {
        // is_request() covers a peer that hangs up before answering
        // ("connection closed before message completed"), which has no
        // io::Error underneath
        (ErrorKind::ConnectionError, connection_message(&text))
    } else {
        // Builder errors and anything reqwest adds later
        (ErrorKind::Unknown, text)
    };

    ProbeOutcome::failed(target.as_str(), kind, message)
}

// Names the usual suspects so the table is readable without -vv
fn connection_message(text: &str) -> String {
    let lowered = text.to_lowercase();
    if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        format!("TLS handshake failed: {}", text)
    } else if lowered.contains("dns") || lowered.contains("resolve") {
        format!("could not resolve host: {}", text)
    } else {
        format!("connection failed: {}", text)
    }
}

// True if an std::io::Error sits anywhere in the source chain (reset, broken pipe, ...)
fn has_io_source(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(err) = source {
        if err.downcast_ref::<std::io::Error>().is_some() {
            return true;
        }
        source = err.source();
    }
    false
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why wrap send() in tokio::time::timeout instead of Client::timeout?
//    - The deadline then belongs to the probe call, not to the client
//    - One client (one connection pool) serves every probe of the run
//
// 2. Why is a 500 not an error here?
//    - reqwest only returns Err when there is no response at all
//    - Ok(response) with any status goes to ProbeOutcome::responded, and the
//      status code decides Online vs Warning
//
// 3. What is is_request()?
//    - reqwest's "error sending request" kind: the transport broke after
//      the request was built (refused, reset, hang-up, TLS)
//    - Builder errors (bad URL, bad header) are a different kind and stay
//      Unknown
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Classification;
    use crate::test_support::{closed_port, serve_hangup, serve_silence, serve_status};

    fn prober() -> HttpProber {
        HttpProber::new(&ProbeSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_ok_response_is_online() {
        let target = Target::parse(&serve_status("200 OK").await).unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(5)).await;

        assert_eq!(outcome.target(), target.as_str());
        assert_eq!(outcome.classification(), Classification::Online);
        assert_eq!(outcome.status_code(), Some(200));
        assert!(outcome.response_time_ms().is_some());
        assert_eq!(outcome.error_kind(), None);
    }

    #[tokio::test]
    async fn test_not_found_is_warning() {
        let target = Target::parse(&serve_status("404 Not Found").await).unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(5)).await;

        assert_eq!(outcome.classification(), Classification::Warning);
        assert_eq!(outcome.status_code(), Some(404));
        assert_eq!(outcome.error_kind(), Some(ErrorKind::HttpError));
    }

    #[tokio::test]
    async fn test_server_error_is_warning() {
        let target = Target::parse(&serve_status("500 Internal Server Error").await).unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(5)).await;

        assert_eq!(outcome.classification(), Classification::Warning);
        assert_eq!(outcome.status_code(), Some(500));
        assert_eq!(outcome.error_kind(), Some(ErrorKind::HttpError));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let target = Target::parse(&serve_silence().await).unwrap();
        let started = Instant::now();
        let outcome = prober().probe(&target, Duration::from_millis(300)).await;

        assert!(started.elapsed() < Duration::from_secs(3));
        assert_eq!(outcome.classification(), Classification::Offline);
        assert_eq!(outcome.error_kind(), Some(ErrorKind::Timeout));
        assert_eq!(outcome.status_code(), None);
        assert_eq!(outcome.response_time_ms(), None);
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let target = Target::parse(&closed_port().await).unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(5)).await;

        assert_eq!(outcome.classification(), Classification::Offline);
        assert_eq!(outcome.error_kind(), Some(ErrorKind::ConnectionError));
        assert_eq!(outcome.status_code(), None);
        assert!(outcome.message().is_some());
    }

    #[tokio::test]
    async fn test_hangup_before_response_is_connection_error() {
        let target = Target::parse(&serve_hangup().await).unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(5)).await;

        assert_eq!(outcome.classification(), Classification::Offline);
        assert_eq!(outcome.error_kind(), Some(ErrorKind::ConnectionError));
        assert_eq!(outcome.status_label(), "Offline (Connection Failed)");
        assert_eq!(outcome.status_code(), None);
        assert_eq!(outcome.response_time_ms(), None);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_connection_error() {
        let target = Target::parse("http://no-such-host.invalid/").unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(30)).await;

        assert_eq!(outcome.classification(), Classification::Offline);
        assert_eq!(outcome.error_kind(), Some(ErrorKind::ConnectionError));
        assert_eq!(outcome.status_code(), None);
    }

    #[tokio::test]
    async fn test_tls_against_plain_http_is_connection_error() {
        // A plain HTTP server answers the TLS ClientHello with garbage
        let plain = serve_status("200 OK").await;
        let target = Target::parse(&plain.replacen("http://", "https://", 1)).unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(5)).await;

        assert_eq!(outcome.classification(), Classification::Offline);
        assert_eq!(outcome.error_kind(), Some(ErrorKind::ConnectionError));
        assert_eq!(outcome.status_code(), None);
    }

    #[tokio::test]
    async fn test_error_message_does_not_repeat_itself() {
        let target = Target::parse(&serve_hangup().await).unwrap();
        let outcome = prober().probe(&target, Duration::from_secs(5)).await;

        let message = outcome.message().unwrap();
        assert_eq!(message.matches("error sending request").count(), 1);
    }

    #[test]
    fn test_rejects_bad_proxy() {
        let settings = ProbeSettings::default().with_proxy(Some("not a url".to_string()));
        assert!(matches!(
            HttpProber::new(&settings),
            Err(Error::InvalidProxy { .. })
        ));
    }
}
