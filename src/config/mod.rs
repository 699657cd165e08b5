//! Benchmark run configuration.
//!
//! Loads a structured document (JSON, or YAML by file extension) describing a
//! benchmark run into a validated, owned [`GlobalConfiguration`]:
//! 1. **Decode** - text into a generic value tree (`decode`)
//! 2. **Resolve** - typed extraction, defaults and validation (`resolver`)
//! 3. **Release** - consuming teardown of the aggregate (`lifecycle`)
//!
//! ## Defaulting
//! The resolver stores "unset" markers exactly as written. Consumers apply the
//! per-entry-over-global layering at read time through `policy`.

mod decode;
mod fields;
mod lifecycle;
mod policy;
mod resolver;
mod types;

pub use decode::{DocumentFormat, decode_str, read_document};
pub use lifecycle::release;
pub use policy::{
    ExecutionPlan, PlannedBenchmark, cpu_assignment, effective_max_iterations, effective_max_time,
};
pub use resolver::{from_value, parse, parse_str};
pub use types::*;
