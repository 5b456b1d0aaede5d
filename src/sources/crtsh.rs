// src/sources/crtsh.rs

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::core::models::DomainName;

const CRTSH_URL: &str = "https://crt.sh/";

// One row of the crt.sh JSON output. `name_value` may hold several
// newline-separated names.
#[derive(Debug, Deserialize)]
struct CrtShEntry {
    #[serde(default)]
    name_value: String,
}

/// Collects hostnames seen in certificates issued under `root`.
///
/// The source is best effort: any failure is logged and yields an empty set
/// so the scan continues with wordlist candidates only.
pub async fn fetch_ct_names(client: &Client, root: &DomainName, timeout: Duration) -> HashSet<String> {
    info!(root = %root, "Querying certificate transparency logs.");
    let query = format!("%.{root}");
    let response = client
        .get(CRTSH_URL)
        .query(&[("q", query.as_str()), ("output", "json")])
        .timeout(timeout)
        .send()
        .await;

    let response = match response {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            warn!(status = %r.status(), "crt.sh returned an error status.");
            return HashSet::new();
        }
        Err(e) => {
            warn!(error = %e, "crt.sh request failed.");
            return HashSet::new();
        }
    };

    match response.text().await {
        Ok(body) => {
            let names = parse_ct_response(&body);
            info!(names = names.len(), "Certificate transparency names collected.");
            names
        }
        Err(e) => {
            warn!(error = %e, "Failed to read crt.sh response body.");
            HashSet::new()
        }
    }
}

/// Extracts raw hostnames from a crt.sh JSON body. Malformed JSON gives an empty set.
pub fn parse_ct_response(body: &str) -> HashSet<String> {
    let entries: Vec<CrtShEntry> = match serde_json::from_str(body) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Could not parse crt.sh response.");
            return HashSet::new();
        }
    };
    debug!(rows = entries.len(), "Parsed crt.sh rows.");

    entries
        .iter()
        .flat_map(|entry| entry.name_value.lines())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
