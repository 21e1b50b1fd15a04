//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

use crate::application::services::pool_sync::SyncAction;

/// Centralized stylesheet for CLI output colors. Every field is a plain
/// `Style` until [`Styles::colorize`] is called.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    /// `→` progress steps and build commands
    pub step: Style,
    /// Table keys
    pub dim: Style,
    /// Pool names in `pools show`
    pub header: Style,
    /// Device Farm ARNs
    pub arn: Style,
    /// A remote pool that was created or updated
    pub changed: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.step = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
        self.arn = Style::new().italic();
        self.changed = Style::new().bold().yellow();
    }

    /// Style for a pool sync outcome: changes stand out, no-ops are dimmed.
    #[must_use]
    pub fn sync_action(&self, action: SyncAction) -> Style {
        match action {
            SyncAction::Created | SyncAction::Updated => self.changed,
            SyncAction::Unchanged => self.dim,
        }
    }
}
