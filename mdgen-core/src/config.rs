//! Registry configuration, read from `~/.mdgen/config.yaml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! As with the store, each loader has an `_at(home)` form used by tests and a
//! no-arg wrapper that resolves home via `dirs::home_dir()`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Key the serialized collection is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "mdgen-projects";
pub const DEFAULT_STEP_TOTAL: i64 = 5;
pub const DEFAULT_DESCRIPTION: &str = "Sin descripción";
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1498050108023-c5249f4df085?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
/// `es-ES` short date, e.g. `16/10/2026`, `3/2/2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%-d/%-m/%Y";

/// How an update that leaves `step_current` outside the status mapping is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangeStep {
    /// Keep the previous status; the step value is stored as given.
    #[default]
    Unchanged,
    /// Clamp the step into `1..=step_total`, then derive.
    Clamp,
    /// Refuse an update that sets an unmapped step with
    /// [`RegistryError::StepOutOfRange`](crate::RegistryError::StepOutOfRange).
    /// Updates that leave the step alone still apply, keeping the status.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub storage_key: String,
    pub default_step_total: i64,
    pub placeholder_description: String,
    pub placeholder_image_url: String,
    /// chrono `strftime` pattern for the creation date.
    pub date_format: String,
    pub out_of_range: OutOfRangeStep,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_step_total: DEFAULT_STEP_TOTAL,
            placeholder_description: DEFAULT_DESCRIPTION.to_string(),
            placeholder_image_url: DEFAULT_IMAGE_URL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            out_of_range: OutOfRangeStep::default(),
        }
    }
}

/// `<home>/.mdgen/`
pub fn mdgen_root(home: &Path) -> PathBuf {
    home.join(".mdgen")
}

/// `<home>/.mdgen/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    mdgen_root(home).join("config.yaml")
}

/// Load the config from `<home>/.mdgen/config.yaml`, falling back to defaults
/// when the file does not exist.
pub fn load_at(home: &Path) -> Result<RegistryConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(RegistryConfig::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<RegistryConfig, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&home)
}
