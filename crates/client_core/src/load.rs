use std::{fmt, sync::Arc};

use shared::domain::Project;
use tracing::{info, warn};

use crate::{projects::ProjectTable, ProjectSource};

/// Outcome of the one-shot catalogue fetch. A failed fetch is kept apart
/// from an empty catalogue.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(error) => Self::Failed(error.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Project records for the current session.
#[derive(Debug, Clone)]
pub struct CatalogueStore {
    state: LoadState<Arc<[Project]>>,
}

impl Default for CatalogueStore {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }
}

impl CatalogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the catalogue once from `source`.
    pub async fn load(source: &dyn ProjectSource) -> Self {
        let mut store = Self::new();
        store.populate(source).await;
        store
    }

    pub async fn populate(&mut self, source: &dyn ProjectSource) {
        let result = source.fetch_projects().await;
        match &result {
            Ok(projects) => info!(count = projects.len(), "project catalogue loaded"),
            Err(error) => warn!(%error, "project catalogue failed to load"),
        }
        self.state = LoadState::from_result(result.map(Arc::<[Project]>::from));
    }

    pub fn state(&self) -> &LoadState<Arc<[Project]>> {
        &self.state
    }

    /// Loaded records, or none while loading or after a failure.
    pub fn records(&self) -> &[Project] {
        self.state.loaded().map(|records| &records[..]).unwrap_or(&[])
    }

    /// A fresh table over the loaded records; empty unless loaded.
    pub fn table(&self) -> ProjectTable {
        match &self.state {
            LoadState::Loaded(records) => ProjectTable::new(Arc::clone(records)),
            _ => ProjectTable::new(Vec::<Project>::new()),
        }
    }
}

#[cfg(test)]
#[path = "tests/load_tests.rs"]
mod tests;
