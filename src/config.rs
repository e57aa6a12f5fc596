//! Construction-time configuration handed in by the embedding process.

use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistorConfig {
    pub file: Option<PathBuf>,
}

impl PersistorConfig {
    #[must_use]
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }
}
