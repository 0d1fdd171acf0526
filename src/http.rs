use crate::error::{Error, Result};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Thin wrapper over `reqwest` with a shared user-agent and hard timeouts.
///
/// Every remote call in this crate goes through here so that no request can
/// block past the configured deadline.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_timeout(user_agent, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self { client })
    }

    /// POST a JSON body with extra headers, returning the raw response text.
    ///
    /// HTTP 429 and quota-flavored error bodies map to
    /// [`Error::QuotaExhausted`]; any other non-success status maps to
    /// [`Error::Remote`].
    pub async fn post_json_raw(
        &self,
        url: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> Result<String> {
        let mut request = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .body(body.to_string());

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(%url, status = status.as_u16(), "completed POST");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || is_quota_body(&text) {
            return Err(Error::QuotaExhausted(truncate(&text, 200)));
        }
        if !status.is_success() {
            return Err(Error::remote(format!(
                "{url} returned {status}: {}",
                truncate(&text, 200)
            )));
        }

        Ok(text)
    }
}

/// Some providers report quota exhaustion with a 200-family status and an
/// error object in the body, so the body gets sniffed as well.
fn is_quota_body(text: &str) -> bool {
    text.contains("insufficient_quota") || text.contains("rate_limit_exceeded")
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_body_detected() {
        assert!(is_quota_body(r#"{"error":{"code":"insufficient_quota"}}"#));
        assert!(!is_quota_body(r#"{"predictions":[]}"#));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "héllo wörld";
        let t = truncate(s, 3);
        assert!(t.ends_with("..."));
    }
}
