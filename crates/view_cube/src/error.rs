use settings::SettingsError;
use thiserror::Error;

/// Convenience alias for fallible view cube operations.
pub type ViewCubeResult<T> = Result<T, ViewCubeError>;

#[derive(Debug, Error)]
pub enum ViewCubeError {
    #[error("unknown view cube zone id {0} (expected 1..=26)")]
    InvalidZone(u8),
    #[error("invalid view cube settings: {0}")]
    Settings(#[from] SettingsError),
}
