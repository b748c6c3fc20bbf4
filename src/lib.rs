//! Core library for the `didsmoke` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, run configuration, the virtual-user workload runner,
//! response checks, metrics aggregation, threshold evaluation, and summary
//! reporting. The primary user-facing interface is the `didsmoke`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod checks;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod scenario;
pub mod summary;
pub mod thresholds;
