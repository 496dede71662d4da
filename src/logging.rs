//! Sets up logging for the binaries.

use std::{fs::OpenOptions, io, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Send log events to the file at `log_path`, and to stderr if `verbose` is set.
///
/// The file gets everything at the `debug` level and above unless `RUST_LOG` says otherwise.
/// Stderr only gets warnings and errors so it does not drown out the menus.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global logger is already set.
pub fn setup_logging(log_path: &Path, verbose: bool) -> io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(file_filter);

    let stderr_log = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(debug_log)
        .with(stderr_log)
        .try_init()
        .map_err(io::Error::other)
}
