//! Error types for mdgen-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ProjectId;

/// Failures raised by a [`KeyValueStore`](crate::store::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure while reading or writing a key, annotated with the file path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.mdgen/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Errors surfaced by [`ProjectRegistry`](crate::registry::ProjectRegistry) mutations.
///
/// Lookup misses are not errors; see [`UpdateOutcome`](crate::registry::UpdateOutcome).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The backing store rejected the persistence write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The collection could not be serialized for persistence.
    #[error("failed to serialize projects: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An update set a `stepCurrent` with no status mapping under [`OutOfRangeStep::Reject`](crate::config::OutOfRangeStep::Reject).
    #[error("project {id}: step {step} has no status mapping (mapped steps are 1..=5, step total {total})")]
    StepOutOfRange { id: ProjectId, step: i64, total: i64 },

    /// The highest stored id is `u64::MAX`; no further id can be assigned.
    #[error("cannot assign a new project id: current max is {max}")]
    IdExhausted { max: ProjectId },
}

/// Errors from loading `~/.mdgen/config.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}
