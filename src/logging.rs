// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::fs::File;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

lazy_static! {
    /// `SUBRECON_LOGLEVEL`, consulted when `RUST_LOG` is unset.
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", env!("CARGO_CRATE_NAME").to_uppercase());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
    static ref DEFAULT_DIRECTIVE: String = format!("{}=info", env!("CARGO_CRATE_NAME"));
}

/// Directory holding the scan log; `./.data` when no home directory is known.
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "subrecon", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

// RUST_LOG wins over the crate variable; both fall back to info for this crate.
fn file_directive(rust_log: Option<String>, crate_level: Option<String>) -> String {
    rust_log
        .or(crate_level)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.clone())
}

/// Sends scan logs to a file in [`log_dir`], truncated on every run.
///
/// With `verbose`, info-level events are mirrored to stderr as well. Stdout
/// is never written so the printed report stays clean.
pub fn initialize_logging(verbose: bool) -> Result<PathBuf> {
    let directory = log_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file = File::create(&log_path)?;

    let directive = file_directive(std::env::var("RUST_LOG").ok(), std::env::var(LOG_ENV.as_str()).ok());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(directive));

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(EnvFilter::new(DEFAULT_DIRECTIVE.as_str()))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(log_path)
}
