//! Application context — unified state passed to every command handler.
//!
//! Holds the output context and the config location. Remote adapters are
//! built on demand, since most commands never talk to Device Farm.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::config::YamlConfigLoader;
use crate::infra::credentials::{Credentials, default_credentials_path};
use crate::infra::device_farm::AwsDeviceFarm;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context. Quiet in JSON mode so progress never mixes
    /// with the JSON document on stdout.
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Loader for the repository config.
    pub config: YamlConfigLoader,
}

impl AppContext {
    #[must_use]
    pub fn new(flags: &OutputFlags, config_path: PathBuf) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config: YamlConfigLoader::new(config_path),
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Build a Device Farm client from the environment or `credentials`
    /// (default `~/.devicefarm.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials can be found.
    pub fn device_farm(&self, credentials: Option<&Path>) -> Result<AwsDeviceFarm> {
        let file = match credentials {
            Some(path) => path.to_path_buf(),
            None => default_credentials_path()?,
        };
        let creds = Credentials::resolve(|name| std::env::var(name).ok(), &file)?;
        Ok(AwsDeviceFarm::new(&creds))
    }
}
