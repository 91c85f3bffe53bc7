use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::Project,
    protocol::{projects_route, ProjectsResponse},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod format;
pub mod load;
pub mod projects;
pub mod table;

pub use load::{CatalogueStore, LoadState};
pub use projects::{categories, ProjectColumn, ProjectTable};
pub use table::{
    derive_view, FilterValue, SortDirection, TableController, TableError, TableView, ViewState,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport { url: Url, source: reqwest::Error },
    #[error("server returned {status} for {url}")]
    Status { url: Url, status: StatusCode },
    #[error("malformed project list from {url}: {source}")]
    Decode { url: Url, source: reqwest::Error },
}

/// Where the catalogue comes from.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<Project>, FetchError>;
}

/// HTTP client for the catalogue API.
#[derive(Debug, Clone)]
pub struct CatalogueClient {
    http: Client,
    projects_url: Url,
}

impl CatalogueClient {
    pub fn new(server_url: &str) -> Result<Self, FetchError> {
        let projects_url = projects_url(server_url)?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { http, projects_url })
    }

    pub fn projects_url(&self) -> &Url {
        &self.projects_url
    }
}

#[async_trait]
impl ProjectSource for CatalogueClient {
    async fn fetch_projects(&self) -> Result<Vec<Project>, FetchError> {
        let url = self.projects_url.clone();
        debug!(%url, "fetching project catalogue");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response
            .json::<ProjectsResponse>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

/// Resolves the projects route against `server_url`, keeping any path
/// prefix the server is mounted under.
fn projects_url(server_url: &str) -> Result<Url, FetchError> {
    let invalid = |source| FetchError::InvalidUrl {
        url: server_url.to_string(),
        source,
    };

    let mut base = Url::parse(server_url.trim()).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(projects_route().trim_start_matches('/'))
        .map_err(invalid)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
