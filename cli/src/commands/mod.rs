//! Command implementations

pub mod devices;
pub mod pools;
pub mod run;
pub mod validate;
pub mod version;

use crate::app::AppContext;
use crate::domain::{ArnError, BuildError, ConfigError, PoolError, UploadError};
use crate::output::json::format_error;

/// Machine-readable code for the JSON error object.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<PoolError>().is_some()
        || err.downcast_ref::<ArnError>().is_some()
        || err.downcast_ref::<ConfigError>().is_some()
    {
        "config"
    } else if let Some(upload) = err.downcast_ref::<UploadError>() {
        match upload {
            UploadError::Failed { .. } => "upload_failed",
            UploadError::TimedOut { .. } => "upload_timeout",
        }
    } else if err.downcast_ref::<BuildError>().is_some() {
        "build"
    } else {
        "error"
    }
}

/// In JSON mode, print the error object on stdout. The error is returned
/// unchanged either way so `main` reports it on stderr and exits 1.
pub fn report_error(app: &AppContext, err: anyhow::Error) -> anyhow::Error {
    if app.is_json() {
        match format_error(&format!("{err:#}"), error_code(&err)) {
            Ok(obj) => println!("{obj}"),
            Err(e) => tracing::warn!("cannot render JSON error: {e}"),
        }
    }
    err
}
