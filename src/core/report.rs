// src/core/report.rs

use chrono::Utc;
use tracing::info;

use crate::core::models::{CandidateReport, DomainName, RootReport, ScanReport, SubdomainReport};

/// Merges the root inspection and candidate results into the final report.
///
/// Candidates without a single resolved record are dropped. The rest are
/// sorted by name so the output does not depend on worker completion order.
/// With `diagnostics` set, per-record error kinds are carried into the report.
pub fn assemble(
    domain: DomainName,
    root: RootReport,
    candidates: Vec<CandidateReport>,
    diagnostics: bool,
) -> ScanReport {
    let total = candidates.len();
    let mut subdomains: Vec<SubdomainReport> = candidates
        .into_iter()
        .filter(|c| c.records.has_records())
        .map(|c| SubdomainReport {
            errors: if diagnostics { c.records.errors() } else { Default::default() },
            records: c.records.found(),
            http: c.probe,
            name: c.name,
        })
        .collect();
    subdomains.sort_by(|a, b| a.name.cmp(&b.name));

    info!(domain = %domain, resolved = subdomains.len(), candidates = total, "Report assembled.");
    ScanReport {
        domain,
        scanned_at: Utc::now(),
        interrupted: false,
        root,
        subdomains,
    }
}
