use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the perceptual-hash library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A native pHash routine reported failure. The status is passed through
    /// as-is: usually an `errno` value, otherwise `-1`.
    #[error("Native call {operation} failed with status {status}")]
    Native {
        operation: &'static str,
        status: i32,
    },

    /// Path cannot be handed to the native library as a C string
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),

    /// A video hash with no frames was used as a distance operand
    #[error("Video hash has no frames")]
    EmptyVideoHash,

    /// Frame count does not fit the native length type
    #[error("Video hash has too many frames: {0}")]
    TooManyFrames(usize),

    /// Text that does not parse as a hex image hash
    #[error("Invalid image hash: {0}")]
    InvalidHash(String),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Logger initialisation error
    #[error("Logging error: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn native(operation: &'static str, status: i32) -> Self {
        Error::Native { operation, status }
    }
}
