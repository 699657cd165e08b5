//! Typed field extraction from decoded objects.
//!
//! A key holding `null` reads the same as a missing key.

use crate::error::{ConfigError, ConfigResult, FieldPath};
use serde_json::{Map, Value};

/// Human-readable name of a JSON value's type, for mismatch errors.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads typed fields out of one object: the global section or a single
/// benchmark entry.
pub(crate) struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    index: Option<usize>,
}

impl<'a> FieldReader<'a> {
    /// Reader over the top-level object.
    pub fn global(map: &'a Map<String, Value>) -> Self {
        Self { map, index: None }
    }

    /// Reader over the benchmark entry at `index`.
    pub fn entry(map: &'a Map<String, Value>, index: usize) -> Self {
        Self {
            map,
            index: Some(index),
        }
    }

    /// Path of `name` within this object.
    pub fn path(&self, name: &'static str) -> FieldPath {
        match self.index {
            Some(index) => FieldPath::entry_field(index, name),
            None => FieldPath::global(name),
        }
    }

    /// Raw value for `name`, or None when absent or null.
    pub fn raw(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|value| !value.is_null())
    }

    pub fn string(&self, name: &'static str) -> ConfigResult<Option<String>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(name, "string", other)),
        }
    }

    pub fn integer_i64(&self, name: &'static str) -> ConfigResult<Option<i64>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Number(n)) if !n.is_f64() => match n.as_i64() {
                Some(v) => Ok(Some(v)),
                None => Err(self.out_of_range(name, n)),
            },
            Some(other) => Err(self.mismatch(name, "integer", other)),
        }
    }

    pub fn integer_i32(&self, name: &'static str) -> ConfigResult<Option<i32>> {
        self.integer_i64(name)?
            .map(|v| i32::try_from(v).map_err(|_| self.out_of_range(name, v)))
            .transpose()
    }

    /// A non-negative integer that fits in `u32`.
    pub fn integer_u32(&self, name: &'static str) -> ConfigResult<Option<u32>> {
        self.integer_u64(name)?
            .map(|v| u32::try_from(v).map_err(|_| self.out_of_range(name, v)))
            .transpose()
    }

    /// A non-negative integer that fits in `u64`.
    pub fn integer_u64(&self, name: &'static str) -> ConfigResult<Option<u64>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Number(n)) if !n.is_f64() => match n.as_u64() {
                Some(v) => Ok(Some(v)),
                None if n.as_i64().is_some_and(|v| v < 0) => Err(ConfigError::validation(
                    self.path(name),
                    format!("must not be negative (got {})", n),
                )),
                None => Err(self.out_of_range(name, n)),
            },
            Some(other) => Err(self.mismatch(name, "non-negative integer", other)),
        }
    }

    /// Any JSON number, integers included.
    pub fn number_f64(&self, name: &'static str) -> ConfigResult<Option<f64>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => Ok(Some(v)),
                None => Err(self.out_of_range(name, n)),
            },
            Some(other) => Err(self.mismatch(name, "number", other)),
        }
    }

    /// An integer switch. Booleans read as 1 and 0; integers are kept as given.
    pub fn switch(&self, name: &'static str) -> ConfigResult<Option<i32>> {
        match self.raw(name) {
            Some(Value::Bool(b)) => Ok(Some(i32::from(*b))),
            Some(Value::Number(n)) if !n.is_f64() => self.integer_i32(name),
            None => Ok(None),
            Some(other) => Err(self.mismatch(name, "boolean or integer", other)),
        }
    }

    fn mismatch(&self, name: &'static str, expected: &'static str, found: &Value) -> ConfigError {
        ConfigError::type_mismatch(self.path(name), expected, type_name(found))
    }

    fn out_of_range(&self, name: &'static str, value: impl std::fmt::Display) -> ConfigError {
        ConfigError::validation(self.path(name), format!("value {} is out of range", value))
    }
}
