//! Resolution errors

use thiserror::Error;

use crate::filter::FilterError;
use crate::remote::RemoteError;

/// Result type for query resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Failure of a whole resolution; no partial results are ever returned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Filter or sort rejected before any remote call
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Remote call failed; propagated unchanged
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ResolveError {
    /// Returns the stable string code of the underlying error
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::Filter(e) => e.code().code(),
            ResolveError::Remote(e) => e.code(),
        }
    }

    /// True when the caller's input caused the failure
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ResolveError::Filter(_))
    }
}
