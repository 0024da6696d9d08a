//! Error status: whether a failed step is worth running again.

use std::fmt;

/// Whether an error may go away if the same step runs again.
///
/// modgraph itself never retries; the status is surfaced so a wrapping build
/// script can decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorStatus {
    /// Running again changes nothing until the input or environment changes,
    /// e.g. a malformed manifest or a missing `dot` executable.
    #[default]
    Permanent,

    /// Running again may succeed, e.g. a renderer that timed out.
    Temporary,
}

impl ErrorStatus {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorStatus::Temporary)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Permanent => "permanent",
            ErrorStatus::Temporary => "temporary",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
