// src/core/pipeline.rs

//! Bounded-concurrency scheduler that drives every candidate through
//! resolution and, when enabled, probing.
//!
//! Each candidate moves `Queued -> Resolving -> {Probing | SkippedNoProbe} -> Done`.
//! A worker owns its candidate for that whole walk, builds the
//! [`CandidateReport`] locally and hands it back through its join handle, so
//! the collected results are the only shared state that ever changes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::ScanConfig;
use crate::core::candidates::CandidateSet;
use crate::core::models::{CandidateReport, DomainName, ProbeResult};
use crate::core::scanner::dns_scanner::{resolve, RecordLookup};
use crate::core::scanner::probe_scanner::Prober;

/// Where a candidate is in its walk through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateState {
    Queued,
    Resolving,
    Probing,
    SkippedNoProbe,
    Done,
}

impl fmt::Display for CandidateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateState::Queued => "queued",
            CandidateState::Resolving => "resolving",
            CandidateState::Probing => "probing",
            CandidateState::SkippedNoProbe => "skipped-no-probe",
            CandidateState::Done => "done",
        };
        f.write_str(label)
    }
}

/// Knobs the scheduler needs from the scan configuration.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub workers: usize,
    pub probe: bool,
    pub dns_timeout: Duration,
    pub probe_timeout: Duration,
}

impl From<&ScanConfig> for PipelineOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            workers: config.workers,
            probe: config.probe,
            dns_timeout: config.dns_timeout,
            probe_timeout: config.probe_timeout,
        }
    }
}

/// Reports of every candidate that reached `Done`, in completion order.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub reports: Vec<CandidateReport>,
    /// Set when cancellation stopped dispatch before every candidate ran.
    pub interrupted: bool,
}

/// Runs all candidates with at most `options.workers` in flight at once.
///
/// # Arguments
///
/// * `candidates` - Names to resolve, dispatched in set order.
/// * `lookup` - DNS seam shared by every worker.
/// * `prober` - HTTP seam, only called for names that resolved.
/// * `options` - Worker count (at least one is always used) and timeouts.
/// * `cancel` - Stops further dispatch when triggered.
///
/// # Returns
///
/// A [`PipelineOutput`] once every dispatched candidate is `Done`.
/// Candidates already running at cancellation finish normally and their
/// reports are kept.
pub async fn run<L, P>(
    candidates: CandidateSet,
    lookup: Arc<L>,
    prober: Arc<P>,
    options: &PipelineOptions,
    cancel: CancellationToken,
) -> PipelineOutput
where
    L: RecordLookup,
    P: Prober,
{
    // A zero-sized pool would never make progress.
    let workers = options.workers.max(1);
    let total = candidates.len();
    info!(candidates = total, workers, probe = options.probe, "Pipeline started.");

    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();
    let mut output = PipelineOutput { reports: Vec::with_capacity(total), interrupted: false };

    for name in candidates {
        debug!(name = %name, state = %CandidateState::Queued);
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            permit = semaphore.clone().acquire_owned() => permit.ok(),
        };
        let Some(permit) = permit else {
            output.interrupted = true;
            break;
        };

        while let Some(finished) = tasks.try_join_next() {
            collect(finished, &mut output.reports);
        }

        let lookup = Arc::clone(&lookup);
        let prober = Arc::clone(&prober);
        let options = options.clone();
        tasks.spawn(async move {
            let _permit = permit;
            process_candidate(lookup.as_ref(), prober.as_ref(), name, &options).await
        });
    }

    if output.interrupted {
        warn!(in_flight = tasks.len(), "Scan cancelled, waiting for in-flight candidates.");
    }
    while let Some(finished) = tasks.join_next().await {
        collect(finished, &mut output.reports);
    }

    info!(
        completed = output.reports.len(),
        total,
        interrupted = output.interrupted,
        "Pipeline finished."
    );
    output
}

/// One worker's full walk for a single candidate.
async fn process_candidate<L, P>(
    lookup: &L,
    prober: &P,
    name: DomainName,
    options: &PipelineOptions,
) -> CandidateReport
where
    L: RecordLookup,
    P: Prober,
{
    debug!(name = %name, state = %CandidateState::Resolving, "Candidate dequeued.");
    let records = resolve(lookup, &name, options.dns_timeout).await;

    let probe = if options.probe && records.has_records() {
        debug!(name = %name, state = %CandidateState::Probing);
        match tokio::time::timeout(probe_bound(options.probe_timeout), prober.probe(&name)).await {
            Ok(result) => Some(result),
            Err(_) => {
                warn!(name = %name, "Probe exceeded its time bound.");
                Some(ProbeResult::default())
            }
        }
    } else {
        debug!(name = %name, state = %CandidateState::SkippedNoProbe);
        None
    };

    debug!(name = %name, state = %CandidateState::Done, resolved = records.has_records());
    CandidateReport { name, records, probe }
}

/// Outer limit on one host check: two schemes, each bounded by `per_request`,
/// plus a second of slack.
fn probe_bound(per_request: Duration) -> Duration {
    per_request * 2 + Duration::from_secs(1)
}

fn collect(finished: Result<CandidateReport, JoinError>, reports: &mut Vec<CandidateReport>) {
    match finished {
        Ok(report) => reports.push(report),
        // A panicking worker loses its own candidate only.
        Err(e) => error!(error = %e, "Candidate worker failed."),
    }
}
