//! Release of a parsed configuration.
//!
//! Releasing consumes the aggregate, so a second release does not compile:
//!
//! ```compile_fail
//! use bench_harness_config::config::{parse, release};
//!
//! fn run() -> Result<(), bench_harness_config::error::ConfigError> {
//!     let config = parse("scenario.json")?;
//!     release(config);
//!     release(config);
//!     Ok(())
//! }
//! ```

use super::types::{GlobalConfiguration, SingleBenchmarkConfiguration};
use tracing::debug;

/// Release every string and list owned by `config`.
///
/// Entries' strings go first, then the entry list's storage, then the global
/// strings. Absent optional strings are skipped.
pub fn release(config: GlobalConfiguration) {
    let GlobalConfiguration {
        benchmarks,
        base_result_directory,
        scenario_name,
        ..
    } = config;

    let count = benchmarks.len();
    let mut entries = benchmarks.into_iter();
    for entry in entries.by_ref() {
        release_entry(entry);
    }
    drop(entries);

    drop(base_result_directory);
    drop(scenario_name);
    debug!(benchmarks = count, "Released benchmark configuration");
}

fn release_entry(entry: SingleBenchmarkConfiguration) {
    let SingleBenchmarkConfiguration {
        filename,
        log_name,
        label,
        additional_info,
        ..
    } = entry;
    drop(filename);
    drop(log_name);
    drop(label);
    drop(additional_info);
}

impl GlobalConfiguration {
    /// Consume and release this configuration. See [`release`].
    pub fn release(self) {
        release(self)
    }
}
