//! Metadata-only freshness probe.
//!
//! A probe issues a HEAD request against the resource URL and extracts
//! the `Last-Modified` header. No body is transferred. An unreachable
//! endpoint or a malformed timestamp is fatal; a missing header just
//! means the remote's freshness is unknown.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use srcdump_core::DumpError;

/// Capability seam for the freshness check, injectable for tests and
/// alternative transports.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe `url` for its remote modification time.
    ///
    /// `Ok(None)` means the resource reported no modification time;
    /// callers must not treat that as a skip signal.
    async fn probe(&self, url: &str) -> Result<Option<DateTime<Utc>>, DumpError>;
}

/// HEAD-request prober over reqwest.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> Result<Option<DateTime<Utc>>, DumpError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| DumpError::UnreachableResource(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DumpError::UnreachableResource(format!(
                "{url} returned {status}"
            )));
        }

        let Some(value) = response.headers().get(reqwest::header::LAST_MODIFIED) else {
            tracing::debug!(url, "no last-modified header on probe response");
            return Ok(None);
        };
        let raw = value
            .to_str()
            .map_err(|_| DumpError::MalformedMetadata("non-ASCII last-modified header".into()))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let parsed = parse_last_modified(raw)?;
        tracing::debug!(url, last_modified = %parsed, "probe complete");
        Ok(Some(parsed))
    }
}

/// Parse an HTTP-date `Last-Modified` value, e.g.
/// `Thu, 06 Dec 2012 11:01:50 GMT`.
pub fn parse_last_modified(raw: &str) -> Result<DateTime<Utc>, DumpError> {
    DateTime::parse_from_rfc2822(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DumpError::MalformedMetadata(format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_http_date() {
        let parsed = parse_last_modified("Thu, 06 Dec 2012 11:01:50 GMT").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2012, 12, 6, 11, 1, 50).unwrap());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let parsed = parse_last_modified("  Wed, 10 Jan 2024 00:00:00 GMT ").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn malformed_timestamp_is_fatal() {
        match parse_last_modified("yesterday-ish") {
            Err(DumpError::MalformedMetadata(msg)) => assert!(msg.contains("yesterday-ish")),
            other => panic!("expected MalformedMetadata, got: {other:?}"),
        }
    }
}
