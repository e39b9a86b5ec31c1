//! Error types for the orbit menu
//!
//! Per-frame math never fails; errors only come from configuration, host
//! commands that cannot be honoured, and a stopped tick thread.

use thiserror::Error;

/// Errors surfaced by fallible orbit menu operations
#[derive(Debug, Error)]
pub enum OrbitError {
    /// A configuration value is outside its usable range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration document could not be parsed
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A selection was requested while the menu has no items
    #[error("no items available for selection")]
    NoItems,

    /// The anchor layout contains no usable positions
    #[error("anchor layout is empty")]
    EmptyLayout,

    /// The tick thread is gone and can no longer receive commands
    #[error("orbit menu is no longer running")]
    Disconnected,
}

pub type Result<T, E = OrbitError> = std::result::Result<T, E>;
