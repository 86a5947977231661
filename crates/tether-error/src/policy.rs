//! A policy for classifying and emitting errors.
//!
//! Library code returns [`crate::Result`] and never logs failures it hands back
//! to the caller. Where a failure is *not* handed back (an association skipped
//! in lenient mode) or at an application boundary, an `ErrorPolicy` decides how
//! to present it:
//! - tracing logs
//! - collected diagnostics in tests
//! - custom telemetry
//!
//! Example
//! ```rust,ignore
//! use tether_error::{ErrorPolicy, Severity, Error};
//!
//! struct PrintPolicy;
//! impl ErrorPolicy for PrintPolicy {
//!     fn classify(&self, e: &Error) -> Severity { e.severity() }
//!     fn emit(&self, e: &Error) { eprintln!("[{:?}] {e}", self.classify(e)); }
//! }
//! ```
use super::{Error, Severity};

pub trait ErrorPolicy: Send + Sync {
    /// Classify the error's severity
    fn classify(&self, error: &Error) -> Severity;

    /// Emit the error according to the policy (e.g., log, collect, etc.)
    fn emit(&self, error: &Error);
}

/// A no-operation policy that does nothing
#[derive(Debug, Clone, Default)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, _error: &Error) {}
}

/// A policy that uses the error's default severity and emits via tracing
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, error: &Error) {
        use tracing::{Level, event};

        match self.classify(error) {
            Severity::Warning => event!(Level::WARN, error = %error),
            Severity::Error | Severity::Fatal => event!(Level::ERROR, error = %error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssociationError, InvalidInputError};

    #[test]
    fn noop_policy_uses_error_severity() {
        let warning: Error = AssociationError::UnsupportedCardinality {
            alias: "tags".into(),
            count: 0,
        }
        .into();
        let invalid: Error = InvalidInputError::EmptyInstructions.into();
        assert_eq!(NoopPolicy.classify(&warning), Severity::Warning);
        assert_eq!(NoopPolicy.classify(&invalid), Severity::Error);
    }
}
