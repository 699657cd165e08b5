//! Benchmark Harness Configuration Library
//!
//! Parses a benchmark run description into a validated configuration for an
//! execution engine.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
