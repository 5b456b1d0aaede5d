// src/config.rs

use std::time::Duration;

/// Labels tried against the root when no wordlist file is given.
pub const DEFAULT_WORDLIST: &[&str] = &[
    "www", "mail", "owa", "vpn", "remote", "portal", "admin", "api", "dev", "test", "stage",
    "staging", "prod", "beta", "static", "cdn", "assets", "blog", "docs", "help", "support",
    "ns1", "ns2", "autodiscover", "m", "webmail", "smtp", "imap", "pop", "ftp", "git", "jira",
    "confluence",
];

pub const USER_AGENT: &str = concat!("subrecon/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_WORKERS: usize = 20;
pub const DEFAULT_DNS_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 4;
pub const DEFAULT_CT_TIMEOUT_SECS: u64 = 10;

/// Settings for one scan. Built by the CLI layer and passed down explicitly.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Upper bound on candidates being resolved or probed at the same time.
    pub workers: usize,
    pub dns_timeout: Duration,
    pub probe_timeout: Duration,
    pub probe: bool,
    /// Surface per-record error kinds in the report instead of hiding them.
    pub diagnostics: bool,
    pub scan_timeout: Option<Duration>,
    pub crt: bool,
    pub ct_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            dns_timeout: Duration::from_secs(DEFAULT_DNS_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            probe: false,
            diagnostics: false,
            scan_timeout: None,
            crt: true,
            ct_timeout: Duration::from_secs(DEFAULT_CT_TIMEOUT_SECS),
        }
    }
}

/// The built-in wordlist as owned labels.
pub fn default_wordlist() -> Vec<String> {
    DEFAULT_WORDLIST.iter().map(|s| s.to_string()).collect()
}
