//! Loads the repository `devicefarm.yml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::RepoConfig;

/// Reads and parses the YAML config at a fixed path.
pub struct YamlConfigLoader {
    path: PathBuf,
}

impl YamlConfigLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative paths in the config are resolved against:
    /// the directory holding the config file.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Parse the config and run the structural checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not valid YAML for the
    /// schema, or fails [`RepoConfig::validate`].
    pub fn load(&self) -> Result<RepoConfig> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        let config: RepoConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), pools = config.devicepools.len(), "loaded config");
        Ok(config)
    }
}
