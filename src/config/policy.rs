//! Consumption-time defaulting.
//!
//! The resolver keeps per-entry "unset" markers verbatim. These helpers apply
//! the layering rules an execution engine uses when it reads them:
//!
//! - an entry's positive cap overrides the global cap
//! - an entry cap of 0 means unlimited, whatever the global cap says
//! - a negative entry cap inherits the global cap (unlimited when that is 0 or lower)
//! - automatic CPU pinning always wins over an entry's explicit `cpu_core`

use super::types::{GlobalConfiguration, SingleBenchmarkConfiguration, positive_seconds};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Iteration cap that applies to `entry`, or None for unlimited.
pub fn effective_max_iterations(
    entry: &SingleBenchmarkConfiguration,
    global: &GlobalConfiguration,
) -> Option<u64> {
    match entry.max_iterations {
        0 => None,
        n if n > 0 => Some(n as u64),
        _ => global.iteration_cap(),
    }
}

/// Time cap that applies to `entry`, or None for unlimited.
pub fn effective_max_time(
    entry: &SingleBenchmarkConfiguration,
    global: &GlobalConfiguration,
) -> Option<Duration> {
    if entry.max_time < 0.0 {
        global.time_cap()
    } else {
        positive_seconds(entry.max_time)
    }
}

/// CPU core the benchmark at `index` should be pinned to, if any.
///
/// With `pin_cpus` set, benchmarks are spread round-robin over
/// `available_cores` and explicit `cpu_core` values are ignored. An `index`
/// past the last entry never gets a core.
pub fn cpu_assignment(
    global: &GlobalConfiguration,
    index: usize,
    available_cores: usize,
) -> Option<u32> {
    let entry = global.benchmarks.get(index)?;
    if global.pins_cpus() {
        if available_cores == 0 {
            return None;
        }
        return u32::try_from(index % available_cores).ok();
    }
    entry.pinned_cpu_core()
}

/// One benchmark with every default resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedBenchmark {
    pub index: usize,
    pub filename: String,
    pub log_name: String,
    pub label: String,
    pub max_iterations: Option<u64>,
    #[serde(serialize_with = "serialize_seconds")]
    pub max_time: Option<Duration>,
    #[serde(serialize_with = "serialize_seconds")]
    pub release_delay: Option<Duration>,
    pub cpu_core: Option<u32>,
    pub stream_priority: Option<i32>,
}

/// Launch plan derived from a configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
    /// Benchmarks in launch order.
    pub benchmarks: Vec<PlannedBenchmark>,
}

impl ExecutionPlan {
    /// Build the launch plan for `config` on a machine with `available_cores`
    /// CPU cores.
    pub fn build(config: &GlobalConfiguration, available_cores: usize) -> Self {
        let benchmarks = config
            .benchmarks
            .iter()
            .enumerate()
            .map(|(index, entry)| PlannedBenchmark {
                index,
                filename: entry.filename.clone(),
                log_name: entry.log_name_or_default(),
                label: entry.label.clone(),
                max_iterations: effective_max_iterations(entry, config),
                max_time: effective_max_time(entry, config),
                release_delay: entry.release_delay(),
                cpu_core: cpu_assignment(config, index, available_cores),
                stream_priority: entry.explicit_stream_priority(),
            })
            .collect();
        Self { benchmarks }
    }
}

fn serialize_seconds<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}
