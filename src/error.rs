//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// The counter could not grow far enough to place a key.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthError {
    /// Growing again would reach the configured size-bits ceiling.
    #[error("table is too large: size bits {size_bits}")]
    TableTooLarge { size_bits: u32 },
}

/// Rejected sizing parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial size bits must be at least 1, got {0}")]
    InitialBitsTooSmall(u32),

    #[error("size bits limit {limit} must exceed initial size bits {initial}")]
    LimitNotAboveInitial { initial: u32, limit: u32 },

    #[error("size bits limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge { limit: u32, max: u32 },
}

/// Errors surfaced by the counting driver.
#[derive(Error, Debug)]
pub enum CountError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write counts")]
    Write(#[source] std::io::Error),

    #[error(transparent)]
    Growth(#[from] GrowthError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
