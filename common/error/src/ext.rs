//! Common extension trait implemented by every crate-local error enum.

use std::error::Error as StdError;
use std::fmt;

use crate::StatusCode;

/// Source-code location captured at the point an error is constructed.
///
/// Populated via `#[snafu(implicit)] location: Location` fields, mirroring
/// `snafu::Location` but kept as a local type so crates in this workspace
/// don't need to agree on a snafu feature flag for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Location {
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

impl snafu::GenerateImplicitData for Location {
    #[track_caller]
    fn generate() -> Self {
        Self::caller()
    }
}

/// Common behavior every crate-local error type exposes.
pub trait ErrorExt: StdError + Send + Sync + 'static {
    /// Classification used for logging policy and retry decisions.
    fn status_code(&self) -> StatusCode;

    /// Narrow back to a concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Whether callers may safely retry the operation that produced this error.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// The message safe to forward to a caller (hides internals for errors
    /// that are not meant to be read by a model or end user).
    fn output_msg(&self) -> String {
        match self.status_code().category() {
            crate::StatusCategory::Common if self.status_code() == StatusCode::Internal => {
                format!("Internal error: {}", StatusCode::Internal as i32)
            }
            _ => self.to_string(),
        }
    }
}

/// A minimal [`ErrorExt`] implementation for wrapping ad-hoc messages, used
/// at boundaries where no dedicated error enum exists yet.
#[derive(Debug)]
pub struct PlainError {
    message: String,
    code: StatusCode,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl PlainError {
    pub fn new(message: impl Into<String>, code: StatusCode) -> Self {
        Self {
            message: message.into(),
            code,
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        code: StatusCode,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            code,
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for PlainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorExt for PlainError {
    fn status_code(&self) -> StatusCode {
        self.code
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Wrap any standard error behind [`ErrorExt`] with an explicit classification.
pub fn boxed(
    err: impl StdError + Send + Sync + 'static,
    code: StatusCode,
) -> Box<dyn ErrorExt> {
    Box::new(PlainError::with_source(err.to_string(), code, err))
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
