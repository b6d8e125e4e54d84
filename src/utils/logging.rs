use std::fs::OpenOptions;
use std::path::Path;

/// Installs a file-backed tracing subscriber, appending to the given log
/// file. Does nothing when logging is disabled, and swallows setup failures:
/// a broken log file must never take the tool down.
pub fn init(enabled: bool, log_path: &Path) {
    if !enabled {
        return;
    }

    let Ok(log_file) = OpenOptions::new().create(true).append(true).open(log_path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter("snapsift=debug,info")
        .with_target(true)
        .try_init();
}
