//! Domain types and validators for the repository `devicefarm.yml` config.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::arn::Arn;
use crate::domain::error::ConfigError;
use crate::domain::pool::PoolDefinitions;
use crate::domain::remote::{TestType, UploadKind};

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_CONFIG_FILE: &str = "devicefarm.yml";
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `devicefarm.yml` at the repo root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Device Farm project that pools, uploads and runs belong to.
    pub project_arn: String,
    /// Pool name → devices or `+pool` references.
    #[serde(default)]
    pub devicepools: PoolDefinitions,
    /// Manifest used for every branch unless overridden.
    #[serde(default)]
    pub defaults: BuildManifest,
    /// Per-branch overrides, merged field by field over `defaults`.
    #[serde(default)]
    pub branches: BTreeMap<String, BuildManifest>,
    #[serde(default)]
    pub uploads: UploadSettings,
}

/// Build configuration for a branch. Every field is optional so branch
/// entries can override only what differs from `defaults`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    /// Shell commands run in the repo root, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestSpec>,
    /// Name of the pool (key of `devicepools`) to run on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicepool: Option<String>,
}

/// The test to schedule. One variant per supported Device Farm test type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestSpec {
    /// Android instrumentation: app APK plus instrumentation APK.
    Instrumentation { app: PathBuf, test_package: PathBuf },
    /// Appium Python: app APK plus a zipped test bundle.
    AppiumPython { app: PathBuf, test_package: PathBuf },
}

/// Upload polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_upload_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_upload_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_upload_timeout_secs() -> u64 {
    DEFAULT_UPLOAD_TIMEOUT_SECS
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl UploadSettings {
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroUploadSetting`] if either value is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroUploadSetting("timeout_secs"));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroUploadSetting("poll_interval_secs"));
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// An upload the test needs, in the order they are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactUpload<'a> {
    pub path: &'a std::path::Path,
    pub kind: UploadKind,
    /// File name reported to Device Farm.
    pub name: &'static str,
}

impl TestSpec {
    #[must_use]
    pub fn test_type(&self) -> TestType {
        match self {
            Self::Instrumentation { .. } => TestType::Instrumentation,
            Self::AppiumPython { .. } => TestType::AppiumPython,
        }
    }

    /// The app upload followed by the test package upload.
    #[must_use]
    pub fn uploads(&self) -> [ArtifactUpload<'_>; 2] {
        match self {
            Self::Instrumentation { app, test_package } => [
                ArtifactUpload {
                    path: app,
                    kind: UploadKind::AndroidApp,
                    name: "app.apk",
                },
                ArtifactUpload {
                    path: test_package,
                    kind: UploadKind::InstrumentationTestPackage,
                    name: "instrumentation.apk",
                },
            ],
            Self::AppiumPython { app, test_package } => [
                ArtifactUpload {
                    path: app,
                    kind: UploadKind::AndroidApp,
                    name: "app.apk",
                },
                ArtifactUpload {
                    path: test_package,
                    kind: UploadKind::AppiumPythonTestPackage,
                    name: "tests.zip",
                },
            ],
        }
    }
}

/// A manifest with every field required for a run present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnableManifest {
    pub branch: String,
    pub steps: Vec<String>,
    pub test: TestSpec,
    pub devicepool: String,
}

// ── Validation and merging ───────────────────────────────────────────────────

impl RepoConfig {
    /// Structural checks that do not need the pool graph.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_arn` is not an ARN, no pools are defined,
    /// or an `uploads` value is zero.
    /// Empty pools are reported by the pool resolver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Arn::parse(&self.project_arn)
            .map_err(|_| ConfigError::InvalidProject(self.project_arn.clone()))?;
        if self.devicepools.is_empty() {
            return Err(ConfigError::NoPools);
        }
        self.uploads.validate()
    }

    /// Manifest for `branch`: fields set under `branches.<branch>` win over
    /// `defaults`; unknown branches get `defaults` unchanged.
    #[must_use]
    pub fn branch_manifest(&self, branch: &str) -> BuildManifest {
        match self.branches.get(branch) {
            Some(over) => self.defaults.merged(over),
            None => self.defaults.clone(),
        }
    }
}

impl BuildManifest {
    /// `self` overlaid with every field `over` sets.
    #[must_use]
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            build: over.build.clone().or_else(|| self.build.clone()),
            test: over.test.clone().or_else(|| self.test.clone()),
            devicepool: over.devicepool.clone().or_else(|| self.devicepool.clone()),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::NotRunnable`] naming the first missing field.
    pub fn runnable(&self, branch: &str) -> Result<RunnableManifest, ConfigError> {
        let missing = |field| ConfigError::NotRunnable {
            branch: branch.to_string(),
            field,
        };
        Ok(RunnableManifest {
            branch: branch.to_string(),
            steps: self.build.clone().unwrap_or_default(),
            test: self.test.clone().ok_or_else(|| missing("test"))?,
            devicepool: self.devicepool.clone().ok_or_else(|| missing("devicepool"))?,
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
