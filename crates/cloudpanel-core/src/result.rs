//! Convenience result type alias for CloudPanel.

use crate::error::AppError;

/// A specialized `Result` type for CloudPanel operations.
pub type AppResult<T> = Result<T, AppError>;
