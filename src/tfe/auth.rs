//! TFE Authentication
//!
//! Resolves the API token used for TFE calls, from an explicit value,
//! the `TFE_TOKEN` environment variable, or the Terraform CLI
//! credentials file written by `terraform login`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable holding an API token
pub const TOKEN_ENV: &str = "TFE_TOKEN";

/// Name of the credentials file inside the Terraform CLI config dir
const CREDENTIALS_FILE: &str = "credentials.tfrc.json";

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    credentials: HashMap<String, HostCredentials>,
}

#[derive(Debug, Deserialize)]
struct HostCredentials {
    token: String,
}

/// Get the Terraform CLI configuration directory
pub fn get_terraform_config_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TF_CLI_CONFIG_DIR") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|p| p.join(".terraform.d"))
}

/// Validate a TFE hostname
/// Hostnames are letters, digits, dots, and hyphens, with an optional port
pub fn validate_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > 253 {
        return false;
    }

    let (host, port) = match hostname.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (hostname, None),
    };

    if let Some(port) = port {
        if port.parse::<u16>().is_err() {
            return false;
        }
    }

    if host.is_empty() || host.starts_with('-') || host.starts_with('.') || host.ends_with('-') {
        return false;
    }

    host.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

/// Read the token for `hostname` from a credentials file
pub fn read_credentials_token(path: &Path, hostname: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: CredentialsFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(file
        .credentials
        .get(hostname)
        .map(|c| c.token.trim().to_string())
        .filter(|t| !t.is_empty()))
}

/// Resolve the API token for `hostname` (explicit > env > credentials file)
pub fn resolve_token(explicit: Option<&str>, hostname: &str) -> Result<String> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        tracing::debug!("Using token from command line");
        return Ok(token.to_string());
    }

    if let Ok(token) = std::env::var(TOKEN_ENV) {
        let token = token.trim();
        if !token.is_empty() {
            tracing::debug!("Using token from {}", TOKEN_ENV);
            return Ok(token.to_string());
        }
    }

    if !validate_hostname(hostname) {
        anyhow::bail!("Invalid TFE hostname: {}", hostname);
    }

    if let Some(dir) = get_terraform_config_dir() {
        let path = dir.join(CREDENTIALS_FILE);
        if let Some(token) = read_credentials_token(&path, hostname)? {
            tracing::debug!("Using token for {} from {}", hostname, path.display());
            return Ok(token);
        }
    }

    Err(anyhow::anyhow!(
        "No API token found for {}. Set {} or run 'terraform login {}'",
        hostname,
        TOKEN_ENV,
        hostname
    ))
}
