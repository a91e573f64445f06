//! Error types for the deleter crate.

use thiserror::Error;

/// Result type alias for deleter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for deleter operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Handle is the null sentinel or was already released.
    #[error("invalid handle")]
    InvalidHandle,

    /// Release operation returned `false`.
    #[error("release operation rejected the handle")]
    Rejected,

    /// Release operation returned a non-zero status code.
    #[error("release operation failed with status {code}")]
    Status {
        /// Status code reported by the release operation.
        code: i32,
    },

    /// Release operation returned an error value.
    #[error("release operation failed: {0}")]
    Release(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Operating system call failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is an invalid handle error.
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Error::InvalidHandle)
    }

    /// Check if this is an I/O error.
    ///
    /// Also true for a release failure whose source is an `io::Error`.
    pub fn is_io(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Release(source) => source.is::<std::io::Error>(),
            _ => false,
        }
    }

    /// Check if the error came from a release operation.
    pub fn is_release_failure(&self) -> bool {
        matches!(
            self,
            Error::Rejected | Error::Status { .. } | Error::Release(_)
        )
    }
}
