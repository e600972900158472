use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    // the log file could not be opened
    Stderr,
}

// RUST_LOG takes precedence over `level`
pub fn init(log_file: &Path, level: &str) -> LogTarget {
    let filter = || {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            let _ = fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .try_init();
            LogTarget::File
        }
        Err(_) => {
            let _ = fmt()
                .with_env_filter(filter())
                .with_target(false)
                .with_writer(io::stderr)
                .try_init();
            LogTarget::Stderr
        }
    }
}
