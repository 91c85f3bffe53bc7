use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalogue file '{path}' is not a JSON array: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read-only project catalogue, loaded once and shared across requests.
///
/// Records are kept exactly as they appear in the file; only the top level
/// has to be an array.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    records: Arc<Vec<Value>>,
}

impl Catalogue {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogueError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<Value> =
            serde_json::from_str(&raw).map_err(|source| CatalogueError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), count = records.len(), "catalogue file parsed");
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
