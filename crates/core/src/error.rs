//! Error types for the fallible edges of the crate
//!
//! The pairwise collision operators themselves never fail; these errors come
//! from configuration, input validation and ensemble construction.

use thiserror::Error;

/// Crate result type
pub type Result<T> = std::result::Result<T, SdmError>;

/// Errors raised outside the pairwise collision core
#[derive(Debug, Error)]
pub enum SdmError {
    #[error("superdroplet {sd_id} is invalid: {reason}")]
    InvalidSuperdrop { sd_id: u64, reason: String },

    #[error("invalid configuration for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
