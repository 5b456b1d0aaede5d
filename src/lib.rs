// src/lib.rs

//! Passive subdomain reconnaissance.
//!
//! Candidate names come from a wordlist and certificate transparency logs,
//! every candidate is resolved for a fixed set of record types by a bounded
//! worker pool, and hosts that resolve can optionally be probed over HTTP(S).
//! The result is a deterministic [`ScanReport`](core::models::ScanReport).

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod sources;
