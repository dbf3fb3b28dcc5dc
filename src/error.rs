use std::io;

use thiserror::Error;

/// Failures of the terminal harness. These end the process.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("input event source closed")]
    InputClosed,

    #[error("stdin must be a tty")]
    NotATty,

    #[error("could not set up logging: {0}")]
    Logging(String),
}
