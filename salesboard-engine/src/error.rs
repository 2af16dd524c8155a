//! Engine error types

use salesboard_client::ClientError;
use shared::InvalidDateRange;
use thiserror::Error;

/// Engine error type
#[derive(Debug, Error)]
pub enum EngineError {
    /// Record fetch or auth call against the gateway failed
    #[error("record fetch failed: {0}")]
    Client(#[from] ClientError),

    /// Reporting period rejected before any fetch was issued
    #[error("invalid reporting period: {0}")]
    InvalidDateRange(#[from] InvalidDateRange),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
