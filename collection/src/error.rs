//! Configuration errors

use shared::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Single and multi selection were both bound
    #[error("a data collection binds either single or multi selection, not both")]
    ConflictingSelection,

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
