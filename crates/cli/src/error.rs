//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 12: input error (bad config file, invalid config values)
//! - -1: startup or runtime failure (window, GL loader, pipeline, present)

use hello_opengl_core::BootstrapError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to an exit code.
#[derive(Debug)]
pub enum CliError {
    /// The window, context, GL functions or the pipeline could not be set
    /// up, or a frame could not be presented.
    Startup(BootstrapError),
    /// A user input error (unreadable config file, bad config values).
    Input(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Startup(_) => -1,
            CliError::Input(_) => 12,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Startup(e) => write!(f, "{e}"),
            CliError::Input(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<BootstrapError> for CliError {
    fn from(e: BootstrapError) -> Self {
        match e {
            BootstrapError::InvalidConfig(msg) => CliError::Input(msg),
            other => CliError::Startup(other),
        }
    }
}
