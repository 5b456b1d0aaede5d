// src/cli.rs

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::TypedValueParser;
use clap::Parser;
use url::Url;

use crate::config::{
    ScanConfig, DEFAULT_DNS_TIMEOUT_SECS, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_WORKERS,
};
use crate::core::models::DomainName;
use crate::error::ReconError;

#[derive(Debug, Parser)]
#[command(
    name = "subrecon",
    version,
    about = "Passive DNS recon: certificate transparency + wordlist subdomain discovery with optional HTTP probing."
)]
pub struct Args {
    /// Target domain (e.g. example.com). A URL is accepted; its host is used.
    pub domain: String,

    /// Disable certificate transparency (crt.sh) discovery.
    #[arg(long)]
    pub no_crt: bool,

    /// Subdomain wordlist, one label per line. Defaults to a small built-in list.
    #[arg(long, value_name = "PATH")]
    pub wordlist: Option<PathBuf>,

    /// Send HEAD requests over http and https to hosts that resolved.
    #[arg(long)]
    pub probe: bool,

    /// Write the report as JSON to this path.
    #[arg(long = "json", value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// Maximum candidates resolved or probed at the same time.
    #[arg(long, default_value_t = DEFAULT_WORKERS, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub workers: usize,

    /// Per-query DNS timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_DNS_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub dns_timeout: u64,

    /// Per-request HTTP probe timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub probe_timeout: u64,

    /// Stop dispatching new candidates after this many seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub scan_timeout: Option<u64>,

    /// Show per-record lookup errors and mirror logs to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The validated scan root.
    pub fn root_domain(&self) -> Result<DomainName, ReconError> {
        parse_target(&self.domain)
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            workers: self.workers,
            dns_timeout: Duration::from_secs(self.dns_timeout),
            probe_timeout: Duration::from_secs(self.probe_timeout),
            probe: self.probe,
            diagnostics: self.verbose,
            scan_timeout: self.scan_timeout.map(Duration::from_secs),
            crt: !self.no_crt,
            ..ScanConfig::default()
        }
    }
}

/// Accepts either a bare host or a URL and returns the normalized root domain.
pub fn parse_target(raw: &str) -> Result<DomainName, ReconError> {
    let raw = raw.trim();
    if raw.contains("://") {
        let host = Url::parse(raw)
            .ok()
            .and_then(|url| url.host_str().map(String::from))
            .ok_or_else(|| ReconError::InvalidDomain(raw.to_string()))?;
        return DomainName::parse_root(&host);
    }
    DomainName::parse_root(raw)
}
