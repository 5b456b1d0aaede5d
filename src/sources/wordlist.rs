// src/sources/wordlist.rs

use std::path::Path;

use tracing::info;

use crate::error::ReconError;

/// Reads subdomain labels from a file, one per line.
/// Blank lines and `#` comments are skipped.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>, ReconError> {
    let bytes = std::fs::read(path).map_err(|source| ReconError::Wordlist {
        path: path.to_path_buf(),
        source,
    })?;
    let labels = parse_wordlist(&String::from_utf8_lossy(&bytes));
    info!(path = %path.display(), labels = labels.len(), "Wordlist loaded.");
    Ok(labels)
}

pub fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
