//! Error types for pagekit
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The driver itself only ever constructs [`Error::Cancelled`]; the other
//! variants exist so capability implementations have a shared vocabulary for
//! the failures the driver propagates verbatim.

use thiserror::Error;

/// The main error type for pagekit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// The governing cancellation token fired before or during the walk
    #[error("pagination cancelled")]
    Cancelled,

    /// The data source failed to produce a page
    #[error("fetch failed for page {page}: {message}")]
    Fetch {
        /// Page number the fetch was for
        page: u32,
        /// What went wrong
        message: String,
    },

    /// The per-item processing step rejected an item
    #[error("processing failed: {message}")]
    Process {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // Rate Limit Errors
    // ============================================================================
    /// The rate-limit evaluation itself failed, distinct from a stop decision
    #[error("rate limit check failed: {message}")]
    RateLimit {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// A free-form error message
    #[error("{0}")]
    Other(String),

    /// Any error a capability implementation needs to surface as-is
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a fetch error for a specific page
    pub fn fetch(page: u32, message: impl Into<String>) -> Self {
        Self::Fetch {
            page,
            message: message.into(),
        }
    }

    /// Create a processing error
    pub fn process(message: impl Into<String>) -> Self {
        Self::Process {
            message: message.into(),
        }
    }

    /// Create a rate limit evaluation error
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
        }
    }

    /// Check if this error is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Result type alias for pagekit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::fetch(3, "connection reset");
        assert_eq!(err.to_string(), "fetch failed for page 3: connection reset");

        let err = Error::process("bad record");
        assert_eq!(err.to_string(), "processing failed: bad record");

        let err = Error::rate_limit("missing headers");
        assert_eq!(err.to_string(), "rate limit check failed: missing headers");

        assert_eq!(Error::Cancelled.to_string(), "pagination cancelled");
    }

    #[test]
    fn test_is_cancelled() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::fetch(1, "boom").is_cancelled());
        assert!(!Error::rate_limit("boom").is_cancelled());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::process("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: processing failed: inner"));
    }
}
