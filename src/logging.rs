use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::HarnessError;

pub const DEFAULT_LEVEL: &str = "info";

/// Route `tracing` output to `path`. The terminal belongs to the UI, so
/// nothing is ever written to stdout or stderr. `level` is an `EnvFilter`
/// directive such as `debug` or `get_serious::session=trace`.
pub fn init_file_logging(path: &Path, level: &str) -> Result<(), HarnessError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_new(level).map_err(|e| HarnessError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| HarnessError::Logging(e.to_string()))
}
