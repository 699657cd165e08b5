//! Configuration resolver.
//!
//! Walks a decoded document and builds a [`GlobalConfiguration`]. Absent
//! fields take their documented defaults; per-entry "unset" markers are kept
//! as-is for the execution engine to interpret.

use super::decode::{self, DocumentFormat};
use super::fields::{FieldReader, type_name};
use super::types::{
    DEFAULT_BASE_RESULT_DIRECTORY, GlobalConfiguration, SingleBenchmarkConfiguration,
    UNSET_MAX_ITERATIONS, UNSET_MAX_TIME, USE_DEFAULT_CPU_CORE, USE_DEFAULT_STREAM_PRIORITY,
};
use crate::error::{ConfigError, ConfigResult, FieldPath};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Parse the configuration document at `path`.
///
/// Either every field of every entry resolves and the whole aggregate is
/// returned, or nothing is returned and everything built so far has already
/// been dropped.
pub fn parse(path: impl AsRef<Path>) -> ConfigResult<GlobalConfiguration> {
    let path = path.as_ref();
    let document = decode::read_document(path)?;
    let config = from_value(&document)?;
    info!(
        path = %path.display(),
        benchmarks = config.benchmark_count(),
        scenario = %config.scenario_name,
        "Loaded benchmark configuration"
    );
    Ok(config)
}

/// Parse a configuration held in memory.
pub fn parse_str(text: &str, format: DocumentFormat) -> ConfigResult<GlobalConfiguration> {
    let document = decode::decode_str(text, format)?;
    from_value(&document)
}

/// Resolve an already decoded document.
pub fn from_value(document: &Value) -> ConfigResult<GlobalConfiguration> {
    let Some(root) = document.as_object() else {
        return Err(ConfigError::decode(
            "<document>",
            "top-level value must be an object",
        ));
    };
    let fields = FieldReader::global(root);

    let max_iterations = fields.integer_i64("max_iterations")?.unwrap_or(0);
    let max_time = fields.number_f64("max_time")?.unwrap_or(0.0);
    let use_processes = fields.switch("use_processes")?.unwrap_or(0);
    let cuda_device = fields.integer_u32("cuda_device")?.unwrap_or(0);
    let pin_cpus = fields.switch("pin_cpus")?.unwrap_or(0);
    let scenario_name = fields.string("scenario_name")?.unwrap_or_default();

    let base_result_directory = match fields.string("base_result_directory")? {
        Some(dir) if dir.is_empty() => {
            return Err(ConfigError::validation(
                fields.path("base_result_directory"),
                "must not be empty",
            ));
        }
        Some(dir) => dir,
        None => DEFAULT_BASE_RESULT_DIRECTORY.to_string(),
    };

    let benchmarks = resolve_benchmarks(fields.raw("benchmarks"))?;

    Ok(GlobalConfiguration {
        max_iterations,
        max_time,
        use_processes,
        cuda_device,
        base_result_directory,
        scenario_name,
        pin_cpus,
        benchmarks,
    })
}

/// Resolve the benchmark list, preserving input order.
///
/// On the first bad entry the partially filled vector is dropped along with
/// every entry already resolved into it.
fn resolve_benchmarks(raw: Option<&Value>) -> ConfigResult<Vec<SingleBenchmarkConfiguration>> {
    let list_path = FieldPath::global("benchmarks");
    let entries = match raw {
        None => return Err(ConfigError::validation(list_path, "benchmark_count must not be 0")),
        Some(Value::Array(entries)) => entries,
        Some(other) => return Err(ConfigError::type_mismatch(list_path, "array", type_name(other))),
    };
    if entries.is_empty() {
        return Err(ConfigError::validation(list_path, "benchmark_count must not be 0"));
    }

    let mut benchmarks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        benchmarks.push(resolve_benchmark(index, entry)?);
    }
    Ok(benchmarks)
}

/// Resolve one benchmark entry.
fn resolve_benchmark(index: usize, raw: &Value) -> ConfigResult<SingleBenchmarkConfiguration> {
    let Some(map) = raw.as_object() else {
        return Err(ConfigError::type_mismatch(
            FieldPath::entry(index),
            "object",
            type_name(raw),
        ));
    };
    let fields = FieldReader::entry(map, index);

    let filename = match fields.string("filename")? {
        Some(name) if !name.is_empty() => name,
        Some(_) => {
            return Err(ConfigError::validation(fields.path("filename"), "must not be empty"));
        }
        None => return Err(ConfigError::validation(fields.path("filename"), "is required")),
    };

    let entry = SingleBenchmarkConfiguration {
        log_name: fields.string("log_name")?,
        label: fields.string("label")?.unwrap_or_default(),
        thread_count: fields.integer_u32("thread_count")?.unwrap_or(0),
        block_count: fields.integer_u32("block_count")?.unwrap_or(0),
        data_size: fields.integer_u64("data_size")?.unwrap_or(0),
        additional_info: fields.string("additional_info")?,
        max_iterations: fields
            .integer_i64("max_iterations")?
            .unwrap_or(UNSET_MAX_ITERATIONS),
        max_time: fields.number_f64("max_time")?.unwrap_or(UNSET_MAX_TIME),
        release_time: fields.number_f64("release_time")?.unwrap_or(0.0),
        cpu_core: fields.integer_i32("cpu_core")?.unwrap_or(USE_DEFAULT_CPU_CORE),
        stream_priority: fields
            .integer_i32("stream_priority")?
            .unwrap_or(USE_DEFAULT_STREAM_PRIORITY),
        filename,
    };

    debug!(
        index,
        filename = %entry.filename,
        label = %entry.label,
        cpu_core = entry.cpu_core,
        "Resolved benchmark entry"
    );
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_minimal_entry_defaults() {
        let config = from_value(&json!({"benchmarks": [{"filename": "a.so"}]})).unwrap();
        assert_eq!(config.max_iterations, 0);
        assert_eq!(config.max_time, 0.0);
        assert_eq!(config.use_processes, 0);
        assert_eq!(config.pin_cpus, 0);
        assert_eq!(config.cuda_device, 0);
        assert_eq!(config.base_result_directory, "./results");
        assert_eq!(config.scenario_name, "");

        let entry = &config.benchmarks[0];
        assert_eq!(entry, &SingleBenchmarkConfiguration::new("a.so"));
    }

    #[test]
    fn test_empty_base_directory_rejected() {
        let err = from_value(&json!({
            "base_result_directory": "",
            "benchmarks": [{"filename": "a.so"}]
        }))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "base_result_directory: must not be empty");
    }

    #[test]
    fn test_benchmarks_must_be_array() {
        let err = from_value(&json!({"benchmarks": {"filename": "a.so"}})).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.to_string(), "benchmarks: expected array, found object");
    }

    #[test]
    fn test_entry_must_be_object() {
        let err = from_value(&json!({"benchmarks": [{"filename": "a.so"}, "b.so"]})).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.index(), Some(1));
        assert_eq!(err.to_string(), "benchmarks[1]: expected object, found string");
    }

    #[test]
    fn test_missing_filename_names_index() {
        let err = from_value(&json!({
            "benchmarks": [{"filename": "a.so"}, {"label": "no file"}]
        }))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.index(), Some(1));
        assert_eq!(err.to_string(), "benchmarks[1].filename: is required");
    }

    #[test]
    fn test_sentinels_kept_verbatim() {
        let config = from_value(&json!({
            "benchmarks": [{
                "filename": "a.so",
                "cpu_core": -7,
                "stream_priority": -100,
                "max_iterations": -3,
                "max_time": -0.5
            }]
        }))
        .unwrap();
        let entry = &config.benchmarks[0];
        assert_eq!(entry.cpu_core, -7);
        assert_eq!(entry.stream_priority, USE_DEFAULT_STREAM_PRIORITY);
        assert_eq!(entry.max_iterations, -3);
        assert_eq!(entry.max_time, -0.5);
    }

    #[test]
    fn test_negative_cuda_device_rejected() {
        let err = from_value(&json!({
            "cuda_device": -1,
            "benchmarks": [{"filename": "a.so"}]
        }))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.field().and_then(FieldPath::name), Some("cuda_device"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = from_value(&json!({
            "comment": "warm-up scenario",
            "benchmarks": [{"filename": "a.so", "comment": 12}]
        }))
        .unwrap();
        assert_eq!(config.benchmark_count(), 1);
    }
}
