// src/output/mod.rs

//! Consumers of a finished [`ScanReport`](crate::core::models::ScanReport).

pub mod console;
pub mod json;
