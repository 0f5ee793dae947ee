//! Lookup request/result exchanged with the host

use super::{resolve, resource_id, ResolutionResult, ResolveError};
use crate::tfe::workspaces::WorkspaceLister;
use anyhow::Result;
use serde::Serialize;
use std::future::Future;

/// A validated lookup of workspace names in one organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub organization: String,
    pub names: Vec<String>,
}

impl LookupRequest {
    /// Build a request, rejecting an empty organization or name list.
    /// The organization is used verbatim, so surrounding whitespace is an error.
    pub fn new(organization: &str, names: Vec<String>) -> Result<Self> {
        if organization.is_empty() {
            anyhow::bail!("organization must not be empty");
        }
        if organization.trim() != organization {
            anyhow::bail!(
                "organization {:?} must not have leading or trailing whitespace",
                organization
            );
        }
        if names.is_empty() {
            anyhow::bail!("at least one workspace name (or \"*\") is required");
        }

        Ok(Self {
            organization: organization.to_string(),
            names,
        })
    }

    /// Identity token for this request
    pub fn id(&self) -> String {
        resource_id(&self.organization, &self.names)
    }

    /// Resolve this request against `lister`
    pub async fn execute<L>(&self, lister: &L) -> Result<LookupResult, ResolveError>
    where
        L: WorkspaceLister + ?Sized,
    {
        let result = resolve(lister, &self.organization, &self.names).await?;

        Ok(LookupResult {
            id: self.id(),
            organization: self.organization.clone(),
            names: self.names.clone(),
            result,
        })
    }

    /// Resolve this request unless `interrupt` completes first.
    ///
    /// Returns `Ok(None)` when interrupted. If `interrupt` fails (for
    /// example the signal handler cannot be installed) the failure is
    /// logged and the lookup runs to completion.
    pub async fn execute_or_interrupt<L, F>(
        &self,
        lister: &L,
        interrupt: F,
    ) -> Result<Option<LookupResult>, ResolveError>
    where
        L: WorkspaceLister + ?Sized,
        F: Future<Output = std::io::Result<()>>,
    {
        let interrupted = async {
            if let Err(e) = interrupt.await {
                tracing::warn!("Interrupt listener unavailable, continuing: {}", e);
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = self.execute(lister) => result.map(Some),
            () = interrupted => Ok(None),
        }
    }
}

/// Everything the host publishes for a lookup
#[derive(Debug, Clone, Serialize)]
pub struct LookupResult {
    pub id: String,
    pub organization: String,
    pub names: Vec<String>,
    #[serde(flatten)]
    pub result: ResolutionResult,
}
