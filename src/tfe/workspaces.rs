//! TFE Workspaces
//!
//! Paginated listing of the workspaces in an organization.

use super::client::TfeClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Workspace information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// External identifier assigned by TFE (`ws-...`)
    pub id: String,
    pub name: String,
}

/// Pagination metadata reported with each page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub prev_page: Option<u32>,
    #[serde(default)]
    pub total_count: u32,
}

impl Pagination {
    /// Pagination for a response that is the only page
    pub fn single() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            ..Self::default()
        }
    }

    /// True once the current page is the last one
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// One page of workspaces
#[derive(Debug, Clone, Default)]
pub struct WorkspaceList {
    pub items: Vec<Workspace>,
    pub pagination: Pagination,
}

/// Options for a single listing request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page to fetch; `None` asks for the first page
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// A service able to list workspaces one page at a time
#[async_trait]
pub trait WorkspaceLister {
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<WorkspaceList>;
}

#[derive(Debug, Deserialize)]
struct WorkspaceListResponse {
    data: Vec<WorkspaceResource>,
    #[serde(default)]
    meta: Option<ListMeta>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceResource {
    id: String,
    attributes: WorkspaceAttributes,
}

#[derive(Debug, Deserialize)]
struct WorkspaceAttributes {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ListMeta {
    #[serde(default)]
    pagination: Option<Pagination>,
}

impl From<WorkspaceResource> for Workspace {
    fn from(resource: WorkspaceResource) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name,
        }
    }
}

/// Decode a JSON:API workspace list document
pub fn parse_workspace_list(value: serde_json::Value) -> Result<WorkspaceList> {
    let response: WorkspaceListResponse =
        serde_json::from_value(value).context("Failed to decode workspace list")?;

    let pagination = response
        .meta
        .and_then(|m| m.pagination)
        .unwrap_or_else(Pagination::single);

    Ok(WorkspaceList {
        items: response.data.into_iter().map(Workspace::from).collect(),
        pagination,
    })
}

#[async_trait]
impl WorkspaceLister for TfeClient {
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<WorkspaceList> {
        let url = self.workspaces_url(organization);

        let mut query = Vec::new();
        if let Some(page) = options.page_number {
            query.push(("page[number]", page.to_string()));
        }
        if let Some(size) = options.page_size.or(self.page_size) {
            query.push(("page[size]", size.to_string()));
        }

        let response = self.get(&url, &query).await?;
        parse_workspace_list(response)
    }
}
