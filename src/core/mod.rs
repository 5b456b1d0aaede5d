// src/core/mod.rs

/// Data structures shared across the scan: names, record outcomes, reports.
pub mod models;

/// Normalized, deduplicated candidate names.
pub mod candidates;

/// Resolver, prober and root inspector, plus the scan entry point.
pub mod scanner;

/// Worker pool that drives candidates through resolution and probing.
pub mod pipeline;

/// Final ordering and filtering of results.
pub mod report;
