//! File logging for terminal programs.
//!
//! A full-screen TUI owns stdout, so diagnostics go to a file instead. The
//! filter comes from `RUST_LOG` and falls back to `info`.

use crate::runtime::ProgramError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber that appends to `path`.
///
/// Fails if the file cannot be opened or a global subscriber is already set.
///
/// ```no_run
/// # fn main() -> Result<(), tabula_core::ProgramError> {
/// tabula_core::init_file_logging("tabula-demo.log")?;
/// tracing::info!("ready");
/// # Ok(())
/// # }
/// ```
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), ProgramError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| ProgramError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = init_file_logging("/definitely/not/a/dir/tabula.log").unwrap_err();
        assert!(matches!(err, ProgramError::Io(_)));
    }
}
