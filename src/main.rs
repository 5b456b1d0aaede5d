// src/main.rs

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use subrecon::cli::Args;
use subrecon::config::{default_wordlist, USER_AGENT};
use subrecon::core::candidates::CandidateSet;
use subrecon::core::scanner::dns_scanner::HickoryLookup;
use subrecon::core::scanner::probe_scanner::HttpProber;
use subrecon::core::scanner::run_full_scan;
use subrecon::logging::initialize_logging;
use subrecon::output::{console, json};
use subrecon::sources::crtsh::fetch_ct_names;
use subrecon::sources::wordlist::load_wordlist;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let log_path = initialize_logging(args.verbose)?;
    info!(log = %log_path.display(), "Logging initialized.");

    // --- Setup: every failure here is fatal ---
    let root = args.root_domain()?;
    let config = args.scan_config();
    let wordlist = match &args.wordlist {
        Some(path) => load_wordlist(path)?,
        None => default_wordlist(),
    };
    let prober = Arc::new(HttpProber::new(config.probe_timeout)?);
    let lookup = Arc::new(HickoryLookup::from_system(config.dns_timeout));

    // --- Candidate discovery ---
    let ct_names = if config.crt {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        fetch_ct_names(&client, &root, config.ct_timeout).await
    } else {
        Default::default()
    };
    let candidates = CandidateSet::build(&root, &wordlist, &ct_names);

    // --- Scan, cancellable by Ctrl-C or the optional deadline ---
    let cancel = CancellationToken::new();
    spawn_cancel_triggers(cancel.clone(), config.scan_timeout);

    let report = run_full_scan(&root, candidates, lookup, prober, &config, cancel).await;

    print!("{}", console::render_summary(&report));
    if let Some(path) = &args.json_out {
        json::write_report(&report, path)?;
        println!("\n[+] Wrote JSON: {}", path.display());
    }
    info!("Done.");
    Ok(())
}

fn spawn_cancel_triggers(cancel: CancellationToken, deadline: Option<std::time::Duration>) {
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing in-flight candidates.");
            on_signal.cancel();
        }
    });

    if let Some(deadline) = deadline {
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            warn!(seconds = deadline.as_secs(), "Scan deadline reached.");
            cancel.cancel();
        });
    }
}
