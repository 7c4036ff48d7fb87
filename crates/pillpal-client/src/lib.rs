//! Enrichment client for parsed medication labels.
//!
//! This crate forwards the medications found by `pillpal-core` to the backend
//! enrichment service, which looks up authoritative drug information for each
//! name/dosage pair.

pub mod client;
pub mod config;
pub mod enrichment;

pub use client::*;
pub use config::*;
pub use enrichment::*;
