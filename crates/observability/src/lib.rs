//! Tracing and logging setup shared by every binary.

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Initialize with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}

pub mod tracing;

pub use self::tracing::{LogFormat, ParseLogFormatError};
