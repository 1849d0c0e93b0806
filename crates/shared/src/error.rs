use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ProjectId;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed TOML dataset: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported dataset format '{extension}' (expected .json or .toml)")]
    UnsupportedFormat { extension: String },
    #[error("project record #{index} has an empty id")]
    MissingId { index: usize },
    #[error("duplicate project id '{0}'")]
    DuplicateId(ProjectId),
}

/// Why a record was left out of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingCoordinates,
    NonNumericCoordinates,
    InvalidCoordinates,
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::MissingCoordinates => "missing lat/lng",
            SkipReason::NonNumericCoordinates => "lat/lng is not a number",
            SkipReason::InvalidCoordinates => "lat/lng out of range or not finite",
        }
    }
}
