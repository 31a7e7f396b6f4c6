//! Configuration for a splitting session.
//!
//! This module provides [`SplitConfig`], which carries the session
//! parameters:
//!
//! - `chunk_size` - Fixed byte budget per chunk (mandatory, >= 1)
//! - `read_size` - How many bytes to request from the source per pull
//!
//! # Example
//!
//! ```
//! use splitrs::SplitConfig;
//!
//! // 17 KiB per chunk
//! let config = SplitConfig::new(17 * 1024)?;
//!
//! // Smaller source reads
//! let config = SplitConfig::new(17 * 1024)?.with_read_size(1024);
//!
//! # Ok::<(), splitrs::SplitError>(())
//! ```

use crate::error::SplitError;

/// Default number of bytes requested from the source per read (8 KiB).
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

/// Configuration for a splitting session.
///
/// `SplitConfig` is validated at construction, before any chunk is produced.
/// The chunk size is a hard budget: every chunk except possibly the last
/// delivers exactly `chunk_size` bytes.
///
/// There is deliberately no `Default` impl: the chunk size is the session's
/// one mandatory parameter and has no sensible universal value.
///
/// # Example
///
/// ```
/// use splitrs::SplitConfig;
///
/// let config = SplitConfig::new(4096)?;
/// assert_eq!(config.chunk_size(), 4096);
///
/// // Zero is rejected up front
/// assert!(SplitConfig::new(0).is_err());
/// # Ok::<(), splitrs::SplitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitConfig {
    /// Fixed byte budget per chunk.
    chunk_size: usize,

    /// Bytes requested from the source per read.
    read_size: usize,
}

impl SplitConfig {
    /// Creates a new configuration with the given chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidChunkSize`] if `chunk_size` is zero.
    /// (`usize` already rules out negative and fractional sizes.)
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::SplitConfig;
    ///
    /// let config = SplitConfig::new(1024)?;
    /// assert_eq!(config.chunk_size(), 1024);
    /// # Ok::<(), splitrs::SplitError>(())
    /// ```
    pub fn new(chunk_size: usize) -> Result<Self, SplitError> {
        if chunk_size == 0 {
            return Err(SplitError::InvalidChunkSize { given: chunk_size });
        }

        Ok(Self {
            chunk_size,
            read_size: DEFAULT_READ_SIZE,
        })
    }

    /// Sets the per-read request size.
    ///
    /// Note: this does not validate the configuration. Use
    /// [`SplitConfig::validate`] to check it.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::SplitConfig;
    ///
    /// let config = SplitConfig::new(1024)?.with_read_size(256);
    /// assert_eq!(config.read_size(), 256);
    /// # Ok::<(), splitrs::SplitError>(())
    /// ```
    pub fn with_read_size(mut self, size: usize) -> Self {
        self.read_size = size;
        self
    }

    /// Returns the fixed byte budget per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of bytes requested from the source per read.
    pub fn read_size(&self) -> usize {
        self.read_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::SplitConfig;
    ///
    /// let config = SplitConfig::new(1024)?.with_read_size(0);
    /// assert!(config.validate().is_err());
    /// # Ok::<(), splitrs::SplitError>(())
    /// ```
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.chunk_size == 0 {
            return Err(SplitError::InvalidChunkSize {
                given: self.chunk_size,
            });
        }
        if self.read_size == 0 {
            return Err(SplitError::InvalidConfig {
                message: "read_size must be non-zero",
            });
        }
        Ok(())
    }
}
