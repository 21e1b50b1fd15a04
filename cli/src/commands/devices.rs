//! `devicefarm devices` — search the Device Farm catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::device_catalog::DeviceCatalog;
use crate::domain::{DevicePlatform, DeviceQuery};
use crate::output::progress;

#[derive(Args)]
pub struct DevicesArgs {
    /// Case-insensitive substring of the device name
    #[arg(default_value = "")]
    pub search: String,

    /// Only Android devices
    #[arg(long, conflicts_with = "ios")]
    pub android: bool,

    /// Only iOS devices
    #[arg(long)]
    pub ios: bool,

    /// Credentials file used when the AWS_* variables are not set
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,
}

impl DevicesArgs {
    #[must_use]
    pub fn query(&self) -> DeviceQuery {
        let platform = if self.android {
            Some(DevicePlatform::Android)
        } else if self.ios {
            Some(DevicePlatform::Ios)
        } else {
            None
        };
        DeviceQuery {
            search: self.search.clone(),
            platform,
        }
    }
}

/// # Errors
///
/// Returns an error if credentials are missing or listing devices fails.
pub async fn run(app: &AppContext, args: &DevicesArgs) -> Result<()> {
    let api = app.device_farm(args.credentials.as_deref())?;
    let catalog = DeviceCatalog::new(&api);
    let pb = progress::spinner(&app.output, "listing devices");
    let found = catalog.search(&args.query()).await;
    progress::finish(&pb);
    app.renderer().render_devices(&found?)
}
