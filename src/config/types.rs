//! Configuration types and structures.
//!
//! Numeric "unset" markers are stored verbatim, exactly as the execution
//! engine reads them. The accessor methods give the same information as
//! `Option`s for Rust callers.

use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// `cpu_core` value meaning "no explicit pin for this entry".
pub const USE_DEFAULT_CPU_CORE: i32 = -1;

/// `stream_priority` value meaning "use the execution engine's default priority".
pub const USE_DEFAULT_STREAM_PRIORITY: i32 = -100;

/// Per-entry `max_iterations` value meaning "inherit the global cap".
pub const UNSET_MAX_ITERATIONS: i64 = -1;

/// Per-entry `max_time` value meaning "inherit the global cap".
pub const UNSET_MAX_TIME: f64 = -1.0;

/// Root directory for result logs when the document names none.
pub const DEFAULT_BASE_RESULT_DIRECTORY: &str = "./results";

/// How the execution engine isolates benchmarks from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationMode {
    /// Each benchmark runs in its own thread (default).
    #[default]
    Thread,
    /// Each benchmark runs in a child process.
    Process,
}

impl std::fmt::Display for IsolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsolationMode::Thread => write!(f, "thread"),
            IsolationMode::Process => write!(f, "process"),
        }
    }
}

/// Settings for one benchmark to run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleBenchmarkConfiguration {
    /// The benchmark's loadable module. Never empty.
    pub filename: String,

    /// Name of the benchmark's result log, relative to the base result
    /// directory. Derived from `filename` when absent.
    pub log_name: Option<String>,

    /// Extra label included in the benchmark's result log.
    pub label: String,

    /// Number of threads the benchmark is asked to use.
    pub thread_count: u32,

    /// Number of blocks the benchmark is asked to use.
    pub block_count: u32,

    /// Size in bytes of the input data the benchmark generates or uses.
    pub data_size: u64,

    /// User-defined argument passed to the benchmark at initialization.
    pub additional_info: Option<String>,

    /// Iteration cap for this benchmark alone (0 = unlimited, negative = inherit).
    pub max_iterations: i64,

    /// Time cap in seconds for this benchmark alone (0 = unlimited, negative = inherit).
    pub max_time: f64,

    /// Seconds to sleep before starting. No delay when 0 or negative.
    pub release_time: f64,

    /// CPU core to pin this benchmark to. Ignored when negative.
    pub cpu_core: i32,

    /// Priority for the benchmark's GPU stream, or [`USE_DEFAULT_STREAM_PRIORITY`].
    pub stream_priority: i32,
}

impl SingleBenchmarkConfiguration {
    /// An entry for `filename` with every other field unset.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            log_name: None,
            label: String::new(),
            thread_count: 0,
            block_count: 0,
            data_size: 0,
            additional_info: None,
            max_iterations: UNSET_MAX_ITERATIONS,
            max_time: UNSET_MAX_TIME,
            release_time: 0.0,
            cpu_core: USE_DEFAULT_CPU_CORE,
            stream_priority: USE_DEFAULT_STREAM_PRIORITY,
        }
    }

    /// The explicitly requested CPU core, if any.
    pub fn pinned_cpu_core(&self) -> Option<u32> {
        u32::try_from(self.cpu_core).ok()
    }

    /// The explicitly requested stream priority, if any.
    pub fn explicit_stream_priority(&self) -> Option<i32> {
        (self.stream_priority != USE_DEFAULT_STREAM_PRIORITY).then_some(self.stream_priority)
    }

    /// Delay before the benchmark starts, if one was requested.
    pub fn release_delay(&self) -> Option<Duration> {
        positive_seconds(self.release_time)
    }

    /// The additional argument, treating an empty string as absent.
    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref().filter(|info| !info.is_empty())
    }

    /// Log name to use, deriving `<filename stem>.json` when none was given.
    pub fn log_name_or_default(&self) -> String {
        if let Some(ref name) = self.log_name {
            return name.clone();
        }
        let stem = Path::new(&self.filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.filename.clone());
        format!("{}.json", stem)
    }
}

/// Run-wide settings plus the ordered list of benchmarks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalConfiguration {
    /// Default iteration cap. Unlimited when 0 or lower.
    pub max_iterations: i64,

    /// Default time cap in seconds. Unlimited when 0 or lower.
    pub max_time: f64,

    /// 0 runs each benchmark in a thread, nonzero in a child process.
    pub use_processes: i32,

    /// CUDA device index to run benchmarks on.
    pub cuda_device: u32,

    /// Root directory for result logs. Never empty.
    pub base_result_directory: String,

    /// Name of the scenario being tested. May be empty.
    pub scenario_name: String,

    /// Nonzero distributes benchmarks evenly across CPU cores, overriding
    /// each entry's `cpu_core`.
    pub pin_cpus: i32,

    /// Benchmarks in launch order. Never empty.
    pub benchmarks: Vec<SingleBenchmarkConfiguration>,
}

impl GlobalConfiguration {
    /// Number of benchmark entries.
    pub fn benchmark_count(&self) -> usize {
        self.benchmarks.len()
    }

    /// Whether benchmarks run in child processes.
    pub fn uses_processes(&self) -> bool {
        self.use_processes != 0
    }

    /// Whether benchmarks are pinned to CPU cores automatically.
    pub fn pins_cpus(&self) -> bool {
        self.pin_cpus != 0
    }

    /// Isolation the execution engine should use between benchmarks.
    pub fn isolation(&self) -> IsolationMode {
        if self.uses_processes() {
            IsolationMode::Process
        } else {
            IsolationMode::Thread
        }
    }

    /// Global iteration cap, if limited.
    pub fn iteration_cap(&self) -> Option<u64> {
        u64::try_from(self.max_iterations).ok().filter(|&cap| cap > 0)
    }

    /// Global time cap, if limited.
    pub fn time_cap(&self) -> Option<Duration> {
        positive_seconds(self.max_time)
    }
}

/// Converts a seconds value to a duration, treating 0, negatives and
/// non-finite values as "none".
pub(crate) fn positive_seconds(seconds: f64) -> Option<Duration> {
    if seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_uses_sentinels() {
        let entry = SingleBenchmarkConfiguration::new("mandelbrot.so");
        assert_eq!(entry.cpu_core, USE_DEFAULT_CPU_CORE);
        assert_eq!(entry.stream_priority, USE_DEFAULT_STREAM_PRIORITY);
        assert!(entry.max_iterations < 0);
        assert!(entry.max_time < 0.0);
        assert!(entry.pinned_cpu_core().is_none());
        assert!(entry.explicit_stream_priority().is_none());
        assert!(entry.release_delay().is_none());
    }

    #[test]
    fn test_explicit_values_exposed() {
        let mut entry = SingleBenchmarkConfiguration::new("timer_spin.so");
        entry.cpu_core = 3;
        entry.stream_priority = -1;
        entry.release_time = 0.25;
        assert_eq!(entry.pinned_cpu_core(), Some(3));
        assert_eq!(entry.explicit_stream_priority(), Some(-1));
        assert_eq!(entry.release_delay(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_log_name_derived_from_filename() {
        let mut entry = SingleBenchmarkConfiguration::new("./bin/timer_spin.so");
        assert_eq!(entry.log_name_or_default(), "timer_spin.json");

        entry.log_name = Some("spin_a.json".to_string());
        assert_eq!(entry.log_name_or_default(), "spin_a.json");
    }

    #[test]
    fn test_empty_additional_info_is_absent() {
        let mut entry = SingleBenchmarkConfiguration::new("a.so");
        entry.additional_info = Some(String::new());
        assert!(entry.additional_info().is_none());

        entry.additional_info = Some("{\"mode\": 2}".to_string());
        assert_eq!(entry.additional_info(), Some("{\"mode\": 2}"));
    }

    #[test]
    fn test_isolation_follows_use_processes() {
        let mut config = GlobalConfiguration {
            max_iterations: 0,
            max_time: 0.0,
            use_processes: 0,
            cuda_device: 0,
            base_result_directory: DEFAULT_BASE_RESULT_DIRECTORY.to_string(),
            scenario_name: String::new(),
            pin_cpus: 0,
            benchmarks: vec![SingleBenchmarkConfiguration::new("a.so")],
        };
        assert_eq!(config.isolation(), IsolationMode::Thread);
        assert!(!config.pins_cpus());

        config.use_processes = 3;
        config.pin_cpus = -1;
        assert_eq!(config.isolation(), IsolationMode::Process);
        assert!(config.pins_cpus());
    }

    #[test]
    fn test_positive_seconds() {
        assert_eq!(positive_seconds(1.5), Some(Duration::from_millis(1500)));
        assert!(positive_seconds(0.0).is_none());
        assert!(positive_seconds(-2.0).is_none());
        assert!(positive_seconds(f64::NAN).is_none());
        assert!(positive_seconds(f64::INFINITY).is_none());
    }
}
