use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

use crate::{
    error::TrustPathError,
    graph::{TopicCode, UserId},
    session::DEFAULT_THRESHOLD,
};

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Query session configuration, usually read from a TOML file.
///
/// ```toml
/// trust_path = "data/trust.txt"
/// ratings_path = "data/ratings.txt"
/// rating_limit = 50000
/// threshold = 0.5
/// source = 15373
/// sink = 9831
/// # topic = 8   # omit to query every topic the source is active in
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    pub trust_path: PathBuf,
    pub ratings_path: PathBuf,
    #[serde(default)]
    pub rating_limit: Option<usize>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub source: UserId,
    pub sink: UserId,
    #[serde(default)]
    pub topic: Option<TopicCode>,
}

impl QueryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TrustPathError> {
        tracing::debug!("Reading query config from: {:?}", path.as_ref());
        let content = read_to_string(path)?;
        let config: QueryConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TrustPathError> {
        tracing::debug!("Writing query config to: {:?}", path.as_ref());
        let toml_string = toml::to_string(self)?;
        write(path, toml_string)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), TrustPathError> {
        if !self.threshold.is_finite() {
            return Err(TrustPathError::MalformedInput(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }
        if self.rating_limit == Some(0) {
            return Err(TrustPathError::MalformedInput(
                "rating_limit must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}
