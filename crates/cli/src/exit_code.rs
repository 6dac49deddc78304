//! Exit code definitions for s3url
//!
//! Every runtime failure exits with `GeneralError`; scripts only need to
//! distinguish success from failure. Command lines clap cannot parse exit
//! with `UsageError`.

/// Exit codes for the s3url binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// URL printed
    Success = 0,

    /// Missing bucket/key, bad URL, storage or local file failure
    GeneralError = 1,

    /// Command line could not be parsed
    UsageError = 2,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}
