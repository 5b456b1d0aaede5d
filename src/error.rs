// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the tool before or after a scan.
///
/// Nothing inside the scan itself produces one of these: per-record and
/// per-probe failures are folded into the report as absent data.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("invalid domain name: {0:?}")]
    InvalidDomain(String),

    #[error("cannot read wordlist {path}: {source}")]
    Wordlist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("cannot write report to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
