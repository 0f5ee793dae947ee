//! TFE Client
//!
//! Main client for interacting with the TFE v2 API, combining the
//! target host, the API token, and HTTP functionality.

use super::http::TfeHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Default Terraform Cloud hostname
pub const DEFAULT_HOSTNAME: &str = "app.terraform.io";

/// Main TFE client
#[derive(Clone)]
pub struct TfeClient {
    pub http: TfeHttpClient,
    pub base_url: Url,
    token: String,
    pub page_size: Option<u32>,
}

impl TfeClient {
    /// Create a new client for `https://{hostname}`
    pub fn new(hostname: &str, token: &str) -> Result<Self> {
        Self::with_base_url(&format!("https://{}", hostname), token)
    }

    /// Create a new client against an explicit base URL
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid TFE address: {}", base_url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid TFE address: {}", base_url);
        }

        Ok(Self {
            http: TfeHttpClient::new()?,
            base_url,
            token: token.to_string(),
            page_size: None,
        })
    }

    /// Replace the HTTP layer (e.g. one configured with a timeout)
    pub fn with_http(mut self, http: TfeHttpClient) -> Self {
        self.http = http;
        self
    }

    /// Request `page_size` items per page instead of the server default
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Host (and port, if any) this client talks to
    pub fn hostname(&self) -> String {
        match (self.base_url.host_str(), self.base_url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            _ => String::new(),
        }
    }

    /// Make a GET request to the TFE API
    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.http.get(url, &self.token, query).await
    }

    /// Build a v2 API URL
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/v2/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Build the workspace listing URL for an organization
    pub fn workspaces_url(&self, organization: &str) -> String {
        self.api_url(&format!(
            "organizations/{}/workspaces",
            urlencoding::encode(organization)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspaces_url() {
        let client = TfeClient::new("app.terraform.io", "token").unwrap();
        assert_eq!(
            client.workspaces_url("acme"),
            "https://app.terraform.io/api/v2/organizations/acme/workspaces"
        );
    }

    #[test]
    fn test_workspaces_url_encodes_organization() {
        let client = TfeClient::with_base_url("http://127.0.0.1:8080/", "token").unwrap();
        assert_eq!(
            client.workspaces_url("a b/c"),
            "http://127.0.0.1:8080/api/v2/organizations/a%20b%2Fc/workspaces"
        );
    }

    #[test]
    fn test_hostname_includes_port() {
        let client = TfeClient::with_base_url("http://127.0.0.1:8080", "token").unwrap();
        assert_eq!(client.hostname(), "127.0.0.1:8080");

        let client = TfeClient::new(DEFAULT_HOSTNAME, "token").unwrap();
        assert_eq!(client.hostname(), DEFAULT_HOSTNAME);
    }

    #[test]
    fn test_invalid_address_rejected() {
        assert!(TfeClient::with_base_url("not a url", "token").is_err());
        assert!(TfeClient::with_base_url("mailto:ops@example.com", "token").is_err());
    }
}
