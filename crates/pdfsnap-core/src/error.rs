// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for PdfSnap.

use thiserror::Error;

/// Top-level error type for all PdfSnap operations.
///
/// A user backing out of the camera or picker is not an error; that is
/// reported as `CaptureOutcome::Cancelled` by the bridge.
#[derive(Debug, Error)]
pub enum SnapError {
    // -- Input --
    #[error("invalid photo data: {0}")]
    InvalidInput(String),

    // -- Document errors --
    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("transport encoding failed: {0}")]
    Encoding(String),

    // -- Platform services --
    #[error("camera or picker failed: {0}")]
    Capture(String),

    #[error("storage operation failed: {0}")]
    Storage(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("share failed: {0}")]
    Share(String),

    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Runtime / persistence --
    #[error("background task failed: {0}")]
    Task(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification used to decide how a failure is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The photo or name we were handed is unusable. Abort this item only.
    InvalidInput,
    /// A platform service or library step failed. Abort this step, keep prior state.
    PlatformFailure,
    /// The stored document could not be located.
    NotFound,
}

impl SnapError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInput(_) | Self::ImageDecode(_) => ErrorClass::InvalidInput,
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound => ErrorClass::NotFound,
            _ => ErrorClass::PlatformFailure,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SnapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_invalid_input() {
        assert_eq!(
            SnapError::ImageDecode("truncated".into()).class(),
            ErrorClass::InvalidInput
        );
    }

    #[test]
    fn io_not_found_classified_as_not_found() {
        let err = SnapError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.class(), ErrorClass::NotFound);

        let err = SnapError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(err.class(), ErrorClass::PlatformFailure);
    }
}
