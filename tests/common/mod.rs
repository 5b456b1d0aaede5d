//! Shared in-process DNS and HTTP doubles for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use subrecon::core::models::{DomainName, ErrorKind, LookupOutcome, ProbeResult, RecordType};
use subrecon::core::scanner::dns_scanner::RecordLookup;
use subrecon::core::scanner::probe_scanner::Prober;

/// Answers from a fixed table; anything not in the table is absent.
/// `delays` lets a test reshuffle completion order between runs.
#[derive(Default)]
pub struct TableLookup {
    answers: HashMap<(String, RecordType), LookupOutcome>,
    delays: HashMap<String, Duration>,
}

impl TableLookup {
    pub fn answer(mut self, name: &str, rtype: RecordType, values: &[&str]) -> Self {
        let values = values.iter().map(|v| v.to_string()).collect();
        self.answers.insert((name.to_string(), rtype), LookupOutcome::Found(values));
        self
    }

    pub fn fail(mut self, name: &str, rtype: RecordType, kind: ErrorKind) -> Self {
        self.answers.insert((name.to_string(), rtype), LookupOutcome::Error(kind));
        self
    }

    pub fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }
}

impl RecordLookup for TableLookup {
    async fn lookup(&self, name: &DomainName, record_type: RecordType) -> LookupOutcome {
        if let Some(delay) = self.delays.get(name.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.answers
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or(LookupOutcome::Absent)
    }
}

/// Records every probed name and claims plain HTTP answers with 200.
#[derive(Default)]
pub struct RecordingProber {
    pub probed: Mutex<Vec<String>>,
}

impl Prober for RecordingProber {
    async fn probe(&self, name: &DomainName) -> ProbeResult {
        self.probed.lock().unwrap().push(name.to_string());
        ProbeResult { http: Some(format!("200 -> http://{name}/")), https: None }
    }
}
