// src/core/scanner/probe_scanner.rs

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::config::USER_AGENT;
use crate::core::models::{DomainName, ProbeResult};
use crate::error::ReconError;

/// Lightweight liveness check for a host that is known to resolve.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, name: &DomainName) -> impl Future<Output = ProbeResult> + Send;
}

/// [`Prober`] issuing one HEAD request per scheme with reqwest.
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Builds the shared client. Redirects are followed so the final URL can
    /// be reported; every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ReconError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Tries HTTP, then HTTPS against `host` (a name, optionally with a port).
    /// The two attempts are independent: a failure on one scheme is recorded
    /// as absent and never skips the other.
    pub async fn check_host(&self, host: &str) -> ProbeResult {
        let http = probe_url(&self.client, &format!("http://{host}")).await;
        let https = probe_url(&self.client, &format!("https://{host}")).await;
        ProbeResult { http, https }
    }
}

impl Prober for HttpProber {
    async fn probe(&self, name: &DomainName) -> ProbeResult {
        info!(name = %name, "Probing host.");
        self.check_host(name.as_str()).await
    }
}

/// Sends a HEAD request and describes the outcome as `"<status> -> <final url>"`.
/// Any failure (refused, timeout, TLS) yields `None`.
pub async fn probe_url(client: &Client, url: &str) -> Option<String> {
    match client.head(url).send().await {
        Ok(response) => {
            let line = format!("{} -> {}", response.status().as_u16(), response.url());
            debug!(url, outcome = %line, "Probe answered.");
            Some(line)
        }
        Err(e) => {
            debug!(url, error = %e, "Probe failed.");
            None
        }
    }
}
