//! Tracing and logging setup shared by every binary in the workspace.

/// Initialize process-wide logging in `format`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, formatting).
pub mod tracing;

pub use tracing::LogFormat;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_accepts_repeated_calls() {
        init(LogFormat::default());
        init(LogFormat::Pretty);
    }
}
