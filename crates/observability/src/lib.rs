//! Process-wide tracing setup shared by the binaries.

/// Initialize tracing for the process (JSON to stderr, `RUST_LOG` filter).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filter, format, writer).
pub mod tracing;
