//! End-to-end scans over in-process DNS and HTTP doubles.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{RecordingProber, TableLookup};
use subrecon::config::ScanConfig;
use subrecon::core::candidates::CandidateSet;
use subrecon::core::models::{DomainName, ErrorKind, RecordType, ScanReport};
use subrecon::core::scanner::run_full_scan;
use subrecon::output::json::to_json;
use subrecon::sources::crtsh::parse_ct_response;
use tokio_util::sync::CancellationToken;

fn root() -> DomainName {
    DomainName::parse("example.com").unwrap()
}

fn scenario_lookup() -> TableLookup {
    TableLookup::default()
        .answer("example.com", RecordType::Ns, &["a.iana-servers.net.", "b.iana-servers.net."])
        .answer("example.com", RecordType::Soa, &["ns.icann.org. noc.dns.icann.org. 2024 7200 3600 1209600 3600"])
        .answer("www.example.com", RecordType::A, &["93.184.216.34"])
        .answer("mail.example.com", RecordType::Cname, &["mail.hosting.net."])
}

async fn scan(lookup: TableLookup, candidates: CandidateSet, config: &ScanConfig) -> (ScanReport, Arc<RecordingProber>) {
    let prober = Arc::new(RecordingProber::default());
    let report = run_full_scan(
        &root(),
        candidates,
        Arc::new(lookup),
        Arc::clone(&prober),
        config,
        CancellationToken::new(),
    )
    .await;
    (report, prober)
}

fn subdomain_names(report: &ScanReport) -> Vec<&str> {
    report.subdomains.iter().map(|s| s.name.as_str()).collect()
}

#[tokio::test]
async fn wordlist_and_ct_scenario() {
    let candidates = CandidateSet::build(&root(), ["www", "mail"], ["mail.example.com", "*.cdn.example.com"]);
    assert_eq!(candidates.len(), 3);

    let (report, _) = scan(scenario_lookup(), candidates, &ScanConfig::default()).await;

    assert_eq!(subdomain_names(&report), vec!["mail.example.com", "www.example.com"]);
    assert_eq!(report.subdomains[0].records[&RecordType::Cname], vec!["mail.hosting.net."]);
    assert_eq!(report.subdomains[1].records[&RecordType::A], vec!["93.184.216.34"]);
    assert!(report.subdomains.iter().all(|s| s.http.is_none()));
    assert_eq!(report.root.records[&RecordType::Ns].len(), 2);
    assert!(!report.interrupted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn output_order_ignores_completion_order() {
    let labels = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
    let build = |slow_first: bool| {
        let mut lookup = TableLookup::default();
        for (i, label) in labels.iter().enumerate() {
            let name = format!("{label}.example.com");
            let rank = if slow_first { labels.len() - i } else { i + 1 };
            lookup = lookup
                .answer(&name, RecordType::A, &["192.0.2.10"])
                .delay(&name, Duration::from_millis(10 * rank as u64));
        }
        lookup
    };
    let config = ScanConfig { workers: 6, ..ScanConfig::default() };

    let (first, _) = scan(build(true), CandidateSet::build(&root(), labels, Vec::<String>::new()), &config).await;
    let (second, _) = scan(build(false), CandidateSet::build(&root(), labels, Vec::<String>::new()), &config).await;

    let expected: Vec<String> = labels.iter().map(|l| format!("{l}.example.com")).collect();
    assert_eq!(subdomain_names(&first), expected);
    assert_eq!(first.subdomains, second.subdomains);
}

#[tokio::test]
async fn probing_skips_names_without_records() {
    let candidates = CandidateSet::build(&root(), ["www", "mail", "ghost"], Vec::<String>::new());
    let config = ScanConfig { probe: true, ..ScanConfig::default() };
    let (report, prober) = scan(scenario_lookup(), candidates, &config).await;

    let mut probed = prober.probed.lock().unwrap().clone();
    probed.sort();
    assert_eq!(probed, vec!["mail.example.com", "www.example.com"]);
    assert!(report.subdomains.iter().all(|s| s.http.is_some()));
}

#[tokio::test]
async fn record_failures_stay_isolated() {
    let lookup = TableLookup::default()
        .fail("www.example.com", RecordType::A, ErrorKind::Timeout)
        .answer("www.example.com", RecordType::Aaaa, &["2001:db8::1"])
        .answer("www.example.com", RecordType::Txt, &["site-verification=abc"]);
    let candidates = CandidateSet::build(&root(), ["www"], Vec::<String>::new());
    let config = ScanConfig { diagnostics: true, ..ScanConfig::default() };

    let (report, _) = scan(lookup, candidates, &config).await;

    let www = &report.subdomains[0];
    assert!(!www.records.contains_key(&RecordType::A));
    assert_eq!(www.records[&RecordType::Aaaa], vec!["2001:db8::1"]);
    assert_eq!(www.records[&RecordType::Txt], vec!["site-verification=abc"]);
    assert_eq!(www.errors.get(&RecordType::A), Some(&ErrorKind::Timeout));
}

#[tokio::test]
async fn unavailable_ct_source_still_scans_wordlist() {
    let ct_names = parse_ct_response("<html>502 Bad Gateway</html>");
    let candidates = CandidateSet::build(&root(), ["www", "mail"], &ct_names);
    assert_eq!(candidates.len(), 2);

    let (report, _) = scan(scenario_lookup(), candidates, &ScanConfig::default()).await;
    assert_eq!(subdomain_names(&report), vec!["mail.example.com", "www.example.com"]);
}

#[tokio::test]
async fn everything_failing_yields_empty_report() {
    let lookup = TableLookup::default().fail("www.example.com", RecordType::A, ErrorKind::Network);
    let candidates = CandidateSet::build(&root(), ["www", "api"], Vec::<String>::new());
    let (report, _) = scan(lookup, candidates, &ScanConfig::default()).await;

    assert!(report.subdomains.is_empty());
    assert!(report.root.records.values().all(|v| v.is_empty()));
}

#[tokio::test]
async fn json_round_trip_preserves_report() {
    let candidates = CandidateSet::build(&root(), ["www", "mail"], Vec::<String>::new());
    let config = ScanConfig { probe: true, diagnostics: true, ..ScanConfig::default() };
    let lookup = scenario_lookup().fail("mail.example.com", RecordType::Mx, ErrorKind::ServFail);
    let (report, _) = scan(lookup, candidates, &config).await;

    let text = to_json(&report).unwrap();
    let parsed: ScanReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, report);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["root"]["NS"].is_array());
    assert_eq!(value["subdomains"][0]["name"], "mail.example.com");
    assert_eq!(value["subdomains"][0]["records"]["CNAME"][0], "mail.hosting.net.");
    assert_eq!(value["subdomains"][0]["errors"]["MX"], "servfail");
    assert_eq!(value["subdomains"][1]["http"]["http"], "200 -> http://www.example.com/");
    assert!(value.get("interrupted").is_none());
}

#[tokio::test]
async fn empty_probe_and_missing_probe_serialize_differently() {
    let candidates = CandidateSet::build(&root(), ["www"], Vec::<String>::new());
    let (mut report, _) = scan(scenario_lookup(), candidates, &ScanConfig::default()).await;

    let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
    assert!(value["subdomains"][0]["http"].is_null());

    report.subdomains[0].http = Some(Default::default());
    let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
    assert_eq!(value["subdomains"][0]["http"], serde_json::json!({}));
}
