//! Error types for splitrs.

use std::fmt;

/// Errors that can occur during a splitting session.
#[derive(Debug)]
pub enum SplitError {
    /// An I/O error occurred while reading from the source.
    Io(std::io::Error),

    /// The configured chunk size is not a positive number of bytes.
    InvalidChunkSize {
        /// The size that was rejected.
        given: usize,
    },

    /// The next chunk was requested before the active one was drained.
    PrematureAdvance {
        /// Index of the chunk that has not yet signaled end-of-data.
        index: u64,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::Io(e) => write!(f, "io error: {}", e),
            SplitError::InvalidChunkSize { given } => {
                write!(f, "invalid chunk size: {} (must be >= 1)", given)
            }
            SplitError::PrematureAdvance { index } => {
                write!(f, "chunk {} was not drained before advancing", index)
            }
            SplitError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SplitError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SplitError {
    fn from(e: std::io::Error) -> Self {
        SplitError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: SplitError = io_err.into();
        matches!(err, SplitError::Io(_));
    }

    #[test]
    fn test_display() {
        let err = SplitError::InvalidChunkSize { given: 0 };
        assert!(err.to_string().contains("invalid chunk size"));

        let err = SplitError::PrematureAdvance { index: 3 };
        assert!(err.to_string().contains("chunk 3"));
    }
}
