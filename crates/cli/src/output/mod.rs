//! Output formatting utilities
//!
//! The signed URL (or its JSON envelope) is the only thing written to
//! stdout. Diagnostics, errors and the upload spinner go to stderr.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::Spinner;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable the upload spinner
    pub no_progress: bool,
    /// Suppress non-error diagnostics
    pub quiet: bool,
}
