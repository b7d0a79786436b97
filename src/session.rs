//! Ownership of the loaded table and the current filtered view.

use crate::config::FilterConfig;
use crate::error::ConfigError;
use crate::processing::apply_filter;
use crate::types::Table;

/// Holds the source [`Table`] and the derived view currently shown to the user.
///
/// The source never changes after construction. Each successful [`Session::apply`] replaces the
/// view wholesale; a failed one leaves it as it was.
#[derive(Debug, Clone)]
pub struct Session {
    source: Table,
    view: Table,
}

impl Session {
    /// Start a session whose view is the full source table.
    pub fn new(source: Table) -> Self {
        let view = source.clone();
        Self { source, view }
    }

    /// The table as loaded.
    pub fn source(&self) -> &Table {
        &self.source
    }

    /// The current derived table.
    pub fn view(&self) -> &Table {
        &self.view
    }

    /// Filter the source with `config` and make the result the current view.
    pub fn apply(&mut self, config: &FilterConfig) -> Result<&Table, ConfigError> {
        self.view = apply_filter(&self.source, config)?;
        Ok(&self.view)
    }

    /// Show the full source table again.
    pub fn reset(&mut self) {
        self.view = self.source.clone();
    }

    /// Consume the session, returning the current view.
    pub fn into_view(self) -> Table {
        self.view
    }
}
