//! Workspace name resolution
//!
//! Resolves a set of requested workspace names (or the `"*"` wildcard)
//! against every page of an organization's workspace listing.
//!
//! - [`resolve`] - walk the pages and build a [`ResolutionResult`]
//! - [`identity`] - stable identity token for a lookup
//! - [`lookup`] - request/result types exchanged with the host

pub mod identity;
pub mod lookup;

use crate::tfe::workspaces::{ListOptions, WorkspaceLister};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::{BTreeMap, HashSet};

pub use identity::resource_id;
pub use lookup::{LookupRequest, LookupResult};

/// Requested name that matches every workspace
pub const WILDCARD: &str = "*";

/// Failure while resolving workspace names
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A page of the workspace listing could not be retrieved; the cause is the `source()`
    #[error("error retrieving workspaces")]
    Fetch(#[source] anyhow::Error),
}

/// Workspaces that matched a request, keyed by workspace name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// name -> external identifier (`ws-...`)
    pub external_ids: BTreeMap<String, String>,
    /// name -> `organization/name`
    pub full_names: BTreeMap<String, String>,
}

impl ResolutionResult {
    /// Legacy `ids` mapping. Always the same map as [`Self::full_names`].
    #[deprecated(note = "use full_names instead; ids will be removed in the future")]
    pub fn ids(&self) -> &BTreeMap<String, String> {
        &self.full_names
    }

    pub fn len(&self) -> usize {
        self.external_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.external_ids.is_empty()
    }

    fn insert(&mut self, organization: &str, name: &str, id: &str) {
        self.external_ids.insert(name.to_string(), id.to_string());
        self.full_names
            .insert(name.to_string(), format!("{}/{}", organization, name));
    }
}

impl Serialize for ResolutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolutionResult", 3)?;
        state.serialize_field("ids", &self.full_names)?;
        state.serialize_field("external_ids", &self.external_ids)?;
        state.serialize_field("full_names", &self.full_names)?;
        state.end()
    }
}

/// Resolve `names` against all workspaces of `organization`.
///
/// Pages are fetched one after another until the listing reports that
/// the current page is the last one. Any fetch failure aborts the whole
/// resolution; names with no matching workspace are ignored.
pub async fn resolve<L, S>(
    lister: &L,
    organization: &str,
    names: &[S],
) -> Result<ResolutionResult, ResolveError>
where
    L: WorkspaceLister + ?Sized,
    S: AsRef<str>,
{
    let wanted: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
    let wildcard = wanted.contains(WILDCARD);

    let mut result = ResolutionResult::default();
    let mut options = ListOptions::default();

    loop {
        let page = lister
            .list(organization, &options)
            .await
            .map_err(ResolveError::Fetch)?;

        tracing::debug!(
            "Fetched page {}/{} of workspaces for {} ({} items)",
            page.pagination.current_page,
            page.pagination.total_pages,
            organization,
            page.items.len()
        );

        for workspace in &page.items {
            if wildcard || wanted.contains(workspace.name.as_str()) {
                result.insert(organization, &workspace.name, &workspace.id);
            }
        }

        if page.pagination.is_last() {
            break;
        }

        match page.pagination.next_page {
            Some(next) => options.page_number = Some(next),
            None => {
                tracing::warn!(
                    "Page {} of {} has no next page, stopping",
                    page.pagination.current_page,
                    page.pagination.total_pages
                );
                break;
            }
        }
    }

    tracing::info!(
        "Resolved {} of {} requested workspace name(s) in {}",
        result.len(),
        wanted.len(),
        organization
    );

    Ok(result)
}
