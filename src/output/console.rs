// src/output/console.rs

use std::fmt::Write;

use crate::core::models::{RecordType, ScanReport, SubdomainReport};
use crate::core::scanner::root_scanner::ROOT_RECORD_TYPES;

// Record types shown inline for a subdomain, in this order.
const HEADLINE_TYPES: &[RecordType] = &[RecordType::Cname, RecordType::A, RecordType::Aaaa];

/// Renders the human-readable summary printed at the end of a scan.
pub fn render_summary(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", report.domain);
    if report.interrupted {
        let _ = writeln!(out, "(scan interrupted, results are partial)");
    }

    let _ = writeln!(out, "\n[Root DNS]");
    // Inspection order first, then anything else the report carries.
    let extra = report.root.records.keys().filter(|t| !ROOT_RECORD_TYPES.contains(t));
    for rtype in ROOT_RECORD_TYPES.iter().chain(extra) {
        match report.root.records.get(rtype) {
            Some(values) if !values.is_empty() => {
                let _ = writeln!(out, "{rtype}: {}", values.join(", "));
            }
            _ => {}
        }
    }

    let _ = writeln!(out, "\n[Resolved subdomains]");
    if report.subdomains.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for sub in &report.subdomains {
        let _ = writeln!(out, "- {}  ({})", sub.name, headline(sub));
        if let Some(probe) = &sub.http {
            let http = probe.http.as_deref().unwrap_or("-");
            let https = probe.https.as_deref().unwrap_or("-");
            let _ = writeln!(out, "    HTTP: http={http} | https={https}");
        }
        if !sub.errors.is_empty() {
            let errors: Vec<String> = sub.errors.iter().map(|(t, k)| format!("{t}={k}")).collect();
            let _ = writeln!(out, "    errors: {}", errors.join(", "));
        }
    }
    out
}

// CNAME/A/AAAA when present, otherwise whatever else resolved.
fn headline(sub: &SubdomainReport) -> String {
    let pick = |types: &mut dyn Iterator<Item = RecordType>| -> Vec<String> {
        types
            .filter_map(|t| sub.records.get(&t).map(|v| format!("{t}={}", v.join(","))))
            .collect()
    };
    let mut parts = pick(&mut HEADLINE_TYPES.iter().copied());
    if parts.is_empty() {
        parts = pick(&mut sub.records.keys().copied());
    }
    parts.join(" | ")
}
