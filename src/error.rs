//! Global error handling for clip4llm
//!
//! Only a handful of these ever end a run: an oversized aggregate, a missing
//! root directory and a failed clipboard write. Everything else is reported
//! per item and skipped by the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for clip4llm operations
#[derive(Error, Debug)]
pub enum Clip4llmError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An existing configuration file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The assembled output would exceed the aggregate ceiling
    #[error(
        "total output size exceeds {} limit ({attempted} bytes); content not copied to the clipboard",
        limit_display(.limit)
    )]
    OutputTooLarge { limit: usize, attempted: usize },

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn limit_display(limit: &usize) -> String {
    crate::utils::format_file_size(*limit as u64)
}

/// Specialized Result type for clip4llm operations
pub type Result<T> = std::result::Result<T, Clip4llmError>;

/// Creates a Clip4llmError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::Clip4llmError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Lets main() return io::Result like the rest of the binary
impl From<Clip4llmError> for io::Error {
    fn from(err: Clip4llmError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}
