//! Auxiliary text resources: path-addressed, lazily-read inputs handed to
//! the generator alongside build properties.

use crate::error::HarnessError;
use std::path::{Path, PathBuf};

/// A non-source text input identified by its path.
///
/// Content is fetched from disk on every [`read`](Self::read) call and
/// decoded strictly as UTF-8. There is no caching; repeated reads within a
/// run re-fetch the same bytes.
#[derive(Debug, Clone)]
pub struct AdditionalText {
    path: PathBuf,
}

impl AdditionalText {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the resource.
    pub fn read(&self) -> Result<String, HarnessError> {
        let bytes = std::fs::read(&self.path).map_err(|e| HarnessError::AdditionalTextUnreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| HarnessError::AdditionalTextUnreadable {
            path: self.path.clone(),
            reason: format!("not valid UTF-8: {}", e),
        })
    }
}
