use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, assembling or running a command line.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading the next line failed or stdin reached end of input.
    #[error("Error reading input: {0}")]
    Input(#[source] io::Error),

    /// A line with no tokens reached the assembler.
    #[error("empty command line")]
    EmptyCommand,

    /// `exit` was given something other than an integer.
    #[error("exit: {0}: numeric argument required")]
    InvalidExitCode(String),

    /// A redirection target could not be opened.
    #[error("{}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external program was found but could not be started.
    #[error("{name}: {source}")]
    Launch {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl ShellError {
    /// Fatal errors end the shell; everything else is reported and the loop goes on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Input(_) | ShellError::InvalidExitCode(_))
    }
}
