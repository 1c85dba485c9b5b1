//! Project configuration, loaded from `.diffmap.toml` when present.

use crate::errors::DiffmapError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffmapConfig {
    /// Branch the diff is computed against (merge-base comparison).
    #[serde(default = "default_compare_branch")]
    pub compare_branch: String,

    /// Fail the run when diff coverage is defined and below this percent.
    #[serde(default)]
    pub fail_under: Option<f64>,
}

impl Default for DiffmapConfig {
    fn default() -> Self {
        Self {
            compare_branch: default_compare_branch(),
            fail_under: None,
        }
    }
}

fn default_compare_branch() -> String {
    "origin/main".to_string()
}

impl DiffmapConfig {
    pub fn load(path: &Path) -> Result<Self, DiffmapError> {
        let content =
            fs::read_to_string(path).map_err(|err| DiffmapError::io(path, err))?;
        toml::from_str(&content).map_err(|err| DiffmapError::Config(err.to_string()))
    }

    /// Load an explicit config path, or `.diffmap.toml` from the working
    /// directory when it exists, or defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, DiffmapError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let implicit = Path::new(".diffmap.toml");
                if implicit.exists() {
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
