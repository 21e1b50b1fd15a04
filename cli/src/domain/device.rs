//! Device search over the Device Farm catalog.

use crate::domain::arn::{Arn, device_descriptor};
use crate::domain::remote::{Device, DevicePlatform};

/// Filter applied by `devicefarm devices`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceQuery {
    /// Case-insensitive substring of the device name. Empty matches all.
    pub search: String,
    pub platform: Option<DevicePlatform>,
}

impl DeviceQuery {
    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        let name_ok = self.search.is_empty()
            || device
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let platform_ok = self.platform.is_none_or(|p| p == device.platform);
        name_ok && platform_ok
    }
}

/// Devices matching `query`, sorted by name.
#[must_use]
pub fn search_devices(devices: &[Device], query: &DeviceQuery) -> Vec<Device> {
    let mut found: Vec<Device> = devices.iter().filter(|d| query.matches(d)).cloned().collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found
}

/// The pool descriptor line for `device`, or `None` if its ARN is malformed.
#[must_use]
pub fn descriptor_for(device: &Device) -> Option<String> {
    Arn::parse(&device.arn)
        .ok()
        .map(|arn| device_descriptor(&arn, &device.name))
}
