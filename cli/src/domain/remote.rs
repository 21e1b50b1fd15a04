//! Domain view of Device Farm resources.
//!
//! These mirror only the fields the CLI reads or writes; the infra adapter
//! converts to and from SDK types.

use std::fmt;

use serde::Serialize;

// ── Devices ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    Android,
    Ios,
    Other,
}

/// A device offered by Device Farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub name: String,
    pub platform: DevicePlatform,
    pub arn: String,
}

// ── Device pools ─────────────────────────────────────────────────────────────

/// Rule attribute used for explicit device lists.
pub const RULE_ATTRIBUTE_ARN: &str = "ARN";
/// Rule operator used for explicit device lists.
pub const RULE_OPERATOR_IN: &str = "IN";

/// One device pool rule. Attribute and operator are kept as the raw strings
/// the service reports so foreign rule shapes survive the round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolRule {
    pub attribute: String,
    pub operator: String,
    pub value: String,
}

impl PoolRule {
    /// `ARN IN <value>`, the only rule shape this tool writes.
    #[must_use]
    pub fn arn_in(value: String) -> Self {
        Self {
            attribute: RULE_ATTRIBUTE_ARN.to_string(),
            operator: RULE_OPERATOR_IN.to_string(),
            value,
        }
    }

    #[must_use]
    pub fn is_arn_in(&self) -> bool {
        self.attribute == RULE_ATTRIBUTE_ARN && self.operator == RULE_OPERATOR_IN
    }
}

/// A device pool owned by Device Farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemotePool {
    pub arn: String,
    pub name: String,
    pub rules: Vec<PoolRule>,
}

// ── Uploads ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    AndroidApp,
    InstrumentationTestPackage,
    AppiumPythonTestPackage,
}

impl UploadKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AndroidApp => "ANDROID_APP",
            Self::InstrumentationTestPackage => "INSTRUMENTATION_TEST_PACKAGE",
            Self::AppiumPythonTestPackage => "APPIUM_PYTHON_TEST_PACKAGE",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing state of an upload. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Initialized,
    Processing,
    Succeeded,
    Failed,
}

/// Returned when an upload is created: its ARN and the pre-signed URL the
/// artifact bytes must be PUT to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSlot {
    pub arn: String,
    pub url: String,
}

// ── Runs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestType {
    Instrumentation,
    AppiumPython,
}

impl TestType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instrumentation => "INSTRUMENTATION",
            Self::AppiumPython => "APPIUM_PYTHON",
        }
    }
}

/// Everything needed to schedule a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub project_arn: String,
    pub device_pool_arn: String,
    pub app_arn: String,
    pub test_type: TestType,
    pub test_package_arn: String,
}
