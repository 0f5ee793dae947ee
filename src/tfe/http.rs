//! HTTP utilities for TFE JSON:API calls

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Media type spoken by the TFE v2 API
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Non-success HTTP status returned by the API
#[derive(Debug, thiserror::Error)]
#[error("API request failed: {status}")]
pub struct ApiStatusError {
    pub status: StatusCode,
}

/// HTTP client wrapper for TFE API calls
#[derive(Clone)]
pub struct TfeHttpClient {
    client: Client,
}

impl TfeHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a new HTTP client with an optional per-request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "tfe-workspace-ids/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request to the TFE API
    pub async fn get(&self, url: &str, token: &str, query: &[(&str, String)]) -> Result<Value> {
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, JSON_API_MEDIA_TYPE)
            .query(query)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ApiStatusError { status }.into());
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

/// Format a TFE API error for display
/// Maps well-known status codes to short hints instead of raw API details
pub fn format_tfe_error(error: &anyhow::Error) -> String {
    let status = error
        .chain()
        .find_map(|e| e.downcast_ref::<ApiStatusError>())
        .map(|e| e.status.as_u16());

    let hint = match status {
        Some(401) => Some("Authentication failed. Set TFE_TOKEN or run 'terraform login'."),
        Some(403) => Some("Permission denied. Check the token's access to this organization."),
        Some(404) => Some("Organization not found, or the token cannot see it."),
        Some(429) => Some("Rate limit exceeded. Please try again later."),
        Some(500 | 502 | 503) => Some("TFE service temporarily unavailable. Please try again."),
        _ => None,
    };
    if let Some(hint) = hint {
        return hint.to_string();
    }

    let error_str = format!("{:#}", error);
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(160)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc d"), "abc d");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = format!("{}é{}", "a".repeat(MAX_LOG_BODY_LENGTH - 1), "b".repeat(50));
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated"));
    }

    fn status_error(status: StatusCode) -> anyhow::Error {
        ApiStatusError { status }.into()
    }

    #[test]
    fn test_format_tfe_error_status_hints() {
        let err = status_error(StatusCode::UNAUTHORIZED);
        assert!(format_tfe_error(&err).starts_with("Authentication failed"));

        let err = status_error(StatusCode::NOT_FOUND).context("error retrieving workspaces");
        assert!(format_tfe_error(&err).starts_with("Organization not found"));

        let err = status_error(StatusCode::BAD_GATEWAY);
        assert!(format_tfe_error(&err).starts_with("TFE service temporarily unavailable"));
    }

    #[test]
    fn test_format_tfe_error_ignores_status_like_text() {
        let err = anyhow::anyhow!("tcp connect error: Connection refused")
            .context("Failed to send request to /api/v2/organizations/team-404/workspaces");

        let shown = format_tfe_error(&err);

        assert!(!shown.starts_with("Organization not found"));
        assert!(shown.contains("Connection refused"));
    }

    #[test]
    fn test_format_tfe_error_unmapped_status_passthrough() {
        let err = status_error(StatusCode::IM_A_TEAPOT);
        assert_eq!(format_tfe_error(&err), "API request failed: 418 I'm a teapot");
    }

    #[test]
    fn test_format_tfe_error_passthrough() {
        let err = anyhow::anyhow!("organization must not be empty");
        assert_eq!(format_tfe_error(&err), "organization must not be empty");
    }
}
