//! Coarse-grained classification for programmatic handling of errors.
//!
//! Typical mappings:
//! - Warning: problems scoped to one association; other work can proceed
//! - Error: the call cannot produce a result for the given input
//! - Fatal: the process cannot continue (configuration, file access)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}
