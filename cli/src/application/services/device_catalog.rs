//! Application service — cached view of the Device Farm device list.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use tokio::sync::OnceCell;

use crate::application::ports::DeviceFarmApi;
use crate::domain::Device;
use crate::domain::device::{DeviceQuery, search_devices};

/// Lists devices once per instance. A failed listing is not cached, so the
/// next call retries it; a successful one is never refreshed.
pub struct DeviceCatalog<'a, A: DeviceFarmApi> {
    api: &'a A,
    devices: OnceCell<Vec<Device>>,
}

impl<'a, A: DeviceFarmApi> DeviceCatalog<'a, A> {
    #[must_use]
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            devices: OnceCell::new(),
        }
    }

    /// # Errors
    ///
    /// Returns the remote error if the device list has not been fetched yet
    /// and fetching it fails.
    pub async fn all_devices(&self) -> Result<&[Device]> {
        let devices = self
            .devices
            .get_or_try_init(|| async {
                let devices = self.api.list_devices().await.context("listing devices")?;
                tracing::debug!(count = devices.len(), "fetched device list");
                Ok::<_, anyhow::Error>(devices)
            })
            .await?;
        Ok(devices)
    }

    /// Devices matching `query`, sorted by name.
    ///
    /// # Errors
    ///
    /// See [`DeviceCatalog::all_devices`].
    pub async fn search(&self, query: &DeviceQuery) -> Result<Vec<Device>> {
        Ok(search_devices(self.all_devices().await?, query))
    }
}
