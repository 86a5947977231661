use super::{ErrorPolicy, Result};

/// Extension trait for `Result` enabling policy-driven emission without
/// contaminating core control-flow with side-effects.
///
/// Example
/// ```rust,ignore
/// use tether_error::{Result, ResultExt, TracingPolicy};
///
/// let rows = integrator.integrate(&cache, &joins).emit_event(&TracingPolicy)?;
/// ```
pub trait ResultExt<T> {
    /// Emit the error using the provided policy and return the result unchanged
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssociationError, Error, Severity};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Count(AtomicUsize);
    impl ErrorPolicy for Count {
        fn classify(&self, error: &Error) -> Severity {
            error.severity()
        }
        fn emit(&self, _error: &Error) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn emit_event_passes_errors_through() {
        let policy = Count::default();
        let warning: Result<()> = Err(AssociationError::UnsupportedCardinality {
            alias: "x".into(),
            count: 3,
        }
        .into());

        assert!(warning.emit_event(&policy).is_err());
        assert_eq!(policy.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ok_results_are_never_emitted() {
        let policy = Count::default();
        let ok: Result<u8> = Ok(7);
        assert_eq!(ok.emit_event(&policy).unwrap(), 7);
        assert_eq!(policy.0.load(Ordering::SeqCst), 0);
    }
}
