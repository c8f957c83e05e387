use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Level used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Sends log output to `path` so it never draws over the terminal UI.
///
/// Calling it twice is harmless; only the first logger sticks.
pub fn init_file_logger(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    if installed.is_ok() {
        log::debug!("logging to {}", path.display());
    }
    Ok(())
}

/// Plain stderr logging for the non-interactive commands.
pub fn init_stderr_logger() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Stderr)
        .try_init();
}
