//! Run configuration: where to read inputs and write the report

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

pub const PLAYER_DATA_FILE: &str = "player_data.txt";
pub const MATCH_DATA_FILE: &str = "match_data.txt";
pub const OUTPUT_FILE: &str = "results.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub player_data: PathBuf,
    pub match_data: PathBuf,
    pub output: PathBuf,
    /// Replay players on the rayon thread pool
    pub parallel: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            player_data: PathBuf::from(PLAYER_DATA_FILE),
            match_data: PathBuf::from(MATCH_DATA_FILE),
            output: PathBuf::from(OUTPUT_FILE),
            parallel: false,
        }
    }
}

impl AuditConfig {
    /// The fixed file names resolved under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            player_data: dir.join(PLAYER_DATA_FILE),
            match_data: dir.join(MATCH_DATA_FILE),
            output: dir.join(OUTPUT_FILE),
            parallel: false,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
