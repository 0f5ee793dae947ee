//! Resolve Terraform Cloud / Enterprise workspace names to their
//! external IDs and `organization/name` full names.
//!
//! # Example
//!
//! ```ignore
//! use tfe_workspace_ids::{resolve, tfe::client::TfeClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = TfeClient::new("app.terraform.io", "my-token")?;
//!     let result = resolve(&client, "acme", &["web", "db"]).await?;
//!     println!("{:?}", result.external_ids);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod resolver;
pub mod tfe;

pub use resolver::{
    resolve, resource_id, LookupRequest, LookupResult, ResolutionResult, ResolveError, WILDCARD,
};
