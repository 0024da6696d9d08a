//! Error kinds for modgraph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide how to report or recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid argument passed to function or on the command line
    InvalidArgument,

    // =========================================================================
    // Manifest errors
    // =========================================================================
    /// The manifest could not be deserialized
    DeserializationFailed,

    /// The manifest parsed but describes an inconsistent build
    InvalidFormat,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Rendering errors
    // =========================================================================
    /// The renderer executable could not be started
    RendererNotFound,

    /// The renderer ran but reported failure
    RenderFailed,

    /// Timeout occurred
    Timeout,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::IoFailed)
    }
}
