//! ARN parsing and the `(arn=<resource>) <name>` device descriptor format.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ArnError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEVICE_FARM_PARTITION: &str = "aws";
pub const DEVICE_FARM_SERVICE: &str = "devicefarm";
/// Device Farm is only offered in this region.
pub const DEVICE_FARM_REGION: &str = "us-west-2";

const DESCRIPTOR_PREFIX: &str = "(arn=";

/// Capture groups: partition, service, region, account id, resource.
/// The resource may itself contain `:` or `/`.
static ARN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^arn:([^:]+):([^:]+):([^:]+):([^:]*):(.+)$").expect("valid regex")
});

static DESCRIPTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^\(arn=([^)]+)\)\s+(\S.*)$").expect("valid regex")
});

// ── Arn ──────────────────────────────────────────────────────────────────────

/// The pieces of an AWS ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// Parse a full `arn:partition:service:region:account:resource` string.
    ///
    /// # Errors
    ///
    /// Returns [`ArnError::Invalid`] if the string is not an ARN.
    pub fn parse(arn: &str) -> Result<Self, ArnError> {
        let caps = ARN_RE
            .captures(arn)
            .ok_or_else(|| ArnError::Invalid(arn.to_string()))?;
        Ok(Self {
            partition: caps[1].to_string(),
            service: caps[2].to_string(),
            region: caps[3].to_string(),
            account_id: caps[4].to_string(),
            resource: caps[5].to_string(),
        })
    }

    /// Device ARNs are global to Device Farm and carry no account id.
    #[must_use]
    pub fn device(resource: &str) -> Self {
        Self {
            partition: DEVICE_FARM_PARTITION.to_string(),
            service: DEVICE_FARM_SERVICE.to_string(),
            region: DEVICE_FARM_REGION.to_string(),
            account_id: String::new(),
            resource: resource.to_string(),
        }
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

// ── Device descriptors ───────────────────────────────────────────────────────

/// Parse one `(arn=<resource>) <display name>` line into a device ARN.
///
/// # Errors
///
/// Returns [`ArnError::InvalidDevice`] if the line does not have exactly one
/// `(arn=...)` prefix followed by a non-empty name.
pub fn parse_descriptor(item: &str) -> Result<Arn, ArnError> {
    let invalid = || ArnError::InvalidDevice(item.to_string());
    let caps = DESCRIPTOR_RE.captures(item).ok_or_else(invalid)?;
    if caps[2].starts_with(DESCRIPTOR_PREFIX) {
        return Err(invalid());
    }
    Ok(Arn::device(&caps[1]))
}

/// Parse a batch of descriptors, preserving order. Fails on the first bad
/// item without returning partial results.
///
/// # Errors
///
/// Returns [`ArnError::InvalidDevice`] naming the first malformed item.
pub fn parse_descriptors<S: AsRef<str>>(items: &[S]) -> Result<Vec<Arn>, ArnError> {
    items.iter().map(|i| parse_descriptor(i.as_ref())).collect()
}

/// Format a device as a descriptor line suitable for a pool definition.
#[must_use]
pub fn device_descriptor(arn: &Arn, name: &str) -> String {
    format!("{DESCRIPTOR_PREFIX}{}) {name}", arn.resource)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
