//! Shared fixtures for tether tests and benches.

pub mod scenarios;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tether_error::Error;

/// Gets the absolute path to the workspace root directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .and_then(Path::parent) // workspace root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Gets the absolute path to the JSON request fixtures directory
pub fn fixtures_dir() -> PathBuf {
    workspace_root().join("tests/fixtures")
}

/// Read and parse `tests/fixtures/<name>`.
pub fn load_fixture(name: &str) -> Result<serde_json::Value, Error> {
    let path = fixtures_dir().join(name);
    let raw = fs::read_to_string(&path).map_err(|source| Error::FileOperation {
        operation: "read fixture",
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|e| Error::Serialization(format!("{}: {e}", path.display())))
}

/// Install a test-friendly subscriber once; later calls are no-ops.
/// Honors `RUST_LOG`, defaulting to `tether_integrate=debug`.
pub fn init_test_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tether_integrate=debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
