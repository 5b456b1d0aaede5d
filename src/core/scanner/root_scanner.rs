// src/core/scanner/root_scanner.rs

use std::time::Duration;

use tracing::{info, warn};

use super::dns_scanner::{resolve_types, RecordLookup};
use crate::core::models::{DomainName, LookupOutcome, RecordType, RootReport};

/// Record types collected for the root domain itself.
pub const ROOT_RECORD_TYPES: &[RecordType] = &[
    RecordType::Ns,
    RecordType::Mx,
    RecordType::Soa,
    RecordType::Txt,
    RecordType::A,
    RecordType::Aaaa,
];

/// Resolves the root's records once, with the same per-type isolation as
/// candidate resolution. Types with no data appear as empty lists.
pub async fn inspect_root<L: RecordLookup>(lookup: &L, root: &DomainName, timeout: Duration) -> RootReport {
    info!(root = %root, "Inspecting root domain.");
    let bundle = resolve_types(lookup, root, ROOT_RECORD_TYPES.iter().copied(), timeout).await;

    let mut report = RootReport::default();
    for (rtype, outcome) in bundle.iter() {
        let values = match outcome {
            LookupOutcome::Found(values) => values.clone(),
            LookupOutcome::Absent => Vec::new(),
            LookupOutcome::Error(kind) => {
                warn!(root = %root, record = %rtype, kind = %kind, "Root lookup failed.");
                Vec::new()
            }
        };
        report.records.insert(*rtype, values);
    }
    report
}
