//! Shared plumbing for CLI command handlers: reading input documents,
//! resolving the output format and writing reports.

mod input;
mod output;

pub use input::{parse_json, read_history, read_submission};
pub use output::{OutputTarget, auto_detect_format, should_use_color, write_output};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// The estimated IQ fell below the requested minimum
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
