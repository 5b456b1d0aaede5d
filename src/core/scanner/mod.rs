// src/core/scanner/mod.rs

pub mod dns_scanner;
pub mod probe_scanner;
pub mod root_scanner;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::ScanConfig;
use crate::core::candidates::CandidateSet;
use crate::core::models::{DomainName, ScanReport};
use crate::core::pipeline::{self, PipelineOptions};
use crate::core::report::assemble;
use self::dns_scanner::RecordLookup;
use self::probe_scanner::Prober;
use self::root_scanner::inspect_root;

/// Runs a complete scan of `root` over an already built candidate set.
///
/// The root inspection and the candidate pipeline run concurrently with
/// `tokio::join!`; their outputs are merged into one [`ScanReport`]. A
/// cancelled scan still returns every candidate that finished, flagged as
/// interrupted.
///
/// # Arguments
/// * `root` - The validated scan root.
/// * `candidates` - Subdomains to resolve, built from the wordlist and CT names.
/// * `lookup` - DNS backend shared by the root inspection and every worker.
/// * `prober` - HTTP backend used for resolved hosts when probing is enabled.
/// * `config` - Worker count, timeouts and output flags.
/// * `cancel` - Token that stops dispatch of further candidates.
///
/// # Returns
/// The assembled `ScanReport`, sorted by subdomain name.
pub async fn run_full_scan<L, P>(
    root: &DomainName,
    candidates: CandidateSet,
    lookup: Arc<L>,
    prober: Arc<P>,
    config: &ScanConfig,
    cancel: CancellationToken,
) -> ScanReport
where
    L: RecordLookup,
    P: Prober,
{
    info!(root = %root, candidates = candidates.len(), "Starting scan.");
    let options = PipelineOptions::from(config);

    let (root_report, output) = tokio::join!(
        inspect_root(lookup.as_ref(), root, config.dns_timeout),
        pipeline::run(candidates, Arc::clone(&lookup), prober, &options, cancel)
    );

    let mut report = assemble(root.clone(), root_report, output.reports, config.diagnostics);
    report.interrupted = output.interrupted;
    info!(subdomains = report.subdomains.len(), interrupted = report.interrupted, "Scan finished.");
    report
}
