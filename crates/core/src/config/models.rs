//! Configuration models for the dashboard core.
//!
//! Settings live in `.botsmith/config.toml`. Every field has a default,
//! so a missing file or an empty table still yields a usable
//! configuration pointing at a local backend.

use serde::{Deserialize, Serialize};

/// Backend base URL used when the configuration does not name one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Unified configuration loaded from the `.botsmith/` directory.
///
/// # Example
///
/// ```toml
/// # .botsmith/config.toml
/// [backend]
/// url = "http://localhost:8000"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Settings for reaching the generation backend.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Connection settings for the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend serving `/bot/stream` and `/bot/download`.
    #[serde(default = "default_backend_url")]
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}
