//! AWS credentials from the environment or a JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
/// File name of the default credentials file in the home directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = ".devicefarm.json";

/// An access key pair. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(rename = "AWS_ACCESS_KEY_ID")]
    pub access_key: String,
    #[serde(rename = "AWS_SECRET_ACCESS_KEY")]
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Both keys from `lookup`, if both are set and non-empty.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Some(Self {
            access_key: get(ACCESS_KEY_VAR)?,
            secret: get(SECRET_KEY_VAR)?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or lacks either key.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let creds: Self = serde_json::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        if creds.access_key.is_empty() || creds.secret.is_empty() {
            anyhow::bail!("{} has an empty access key or secret", path.display());
        }
        Ok(creds)
    }

    /// Environment first, then the credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error naming both sources if neither provides credentials.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>, file: &Path) -> Result<Self> {
        if let Some(creds) = Self::from_env(lookup) {
            tracing::debug!("using credentials from environment");
            return Ok(creds);
        }
        Self::from_file(file).with_context(|| {
            format!(
                "no credentials: set {ACCESS_KEY_VAR} and {SECRET_KEY_VAR}, or provide {}",
                file.display()
            )
        })
    }
}

/// `~/.devicefarm.json`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_credentials_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(DEFAULT_CREDENTIALS_FILE))
}
