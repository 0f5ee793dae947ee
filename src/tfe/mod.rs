//! Terraform Cloud / Enterprise API interaction module
//!
//! This module provides the pieces needed to talk to the TFE v2 API:
//! token discovery, an authenticated HTTP client, and the workspace
//! listing endpoint.
//!
//! # Module Structure
//!
//! - [`auth`] - API token discovery (env var, Terraform CLI credentials file)
//! - [`client`] - Main TFE client combining hostname, token and HTTP
//! - [`http`] - HTTP utilities for JSON:API calls
//! - [`workspaces`] - Paginated workspace listing
//!
//! # Example
//!
//! ```ignore
//! use tfe_workspace_ids::tfe::{client::TfeClient, workspaces::{ListOptions, WorkspaceLister}};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = TfeClient::new("app.terraform.io", "my-token")?;
//!     let page = client.list("my-org", &ListOptions::default()).await?;
//!     println!("{} workspaces on page 1", page.items.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod workspaces;
