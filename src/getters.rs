//! Typed accessors
//!
//! Four call styles are provided for every type:
//!
//! - `try_get_*` returns a `Result`, failing when nothing matches or the value does
//!   not convert;
//! - `get_*` falls back to the type's default value;
//! - `get_*_or` falls back to a caller-supplied value;
//! - `must_get_*` panics, naming the key path. Meant for start-up code.
//!
//! Lookups use the first node matching the spec, so they see through stacked scopes.

use crate::args::{Args, StrArgs};
use crate::error::{ConversionError, TreeError};
use crate::keys::{IntoKeySpec, KeySpec, WILDCARD};
use crate::tree::{NodeId, Tree};
use crate::value::Value;
use chrono::{DateTime, Utc};
use std::time::Duration;

fn must<T>(result: Result<T, TreeError>, spec: &KeySpec) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("required key {spec}: {err}"),
    }
}

impl Tree {
    fn try_convert<T>(
        &self,
        node: NodeId,
        spec: &KeySpec,
        convert: impl FnOnce(&Value) -> Result<T, ConversionError>,
    ) -> Result<T, TreeError> {
        let found = self.find_first(node, spec)?;
        match self.value(found) {
            Some(value) => Ok(convert(value)?),
            None => Err(ConversionError::BadValue(String::new()).into()),
        }
    }

    // Nodes

    pub fn try_get_node(&self, node: NodeId, keys: impl IntoKeySpec) -> Result<NodeId, TreeError> {
        self.find_first(node, &keys.into_key_spec())
    }

    pub fn get_node(&self, node: NodeId, keys: impl IntoKeySpec) -> Option<NodeId> {
        self.try_get_node(node, keys).ok()
    }

    pub fn get_node_or(&self, node: NodeId, keys: impl IntoKeySpec, default: NodeId) -> NodeId {
        self.get_node(node, keys).unwrap_or(default)
    }

    pub fn must_get_node(&self, node: NodeId, keys: impl IntoKeySpec) -> NodeId {
        let spec = keys.into_key_spec();
        must(self.find_first(node, &spec), &spec)
    }

    // Raw values

    /// The raw value of the first match; a matching node without a value gives `Ok(None)`.
    pub fn try_get(
        &self,
        node: NodeId,
        keys: impl IntoKeySpec,
    ) -> Result<Option<&Value>, TreeError> {
        let found = self.try_get_node(node, keys)?;
        Ok(self.value(found))
    }

    pub fn get(&self, node: NodeId, keys: impl IntoKeySpec) -> Option<&Value> {
        self.try_get(node, keys).ok().flatten()
    }

    pub fn get_or(&self, node: NodeId, keys: impl IntoKeySpec, default: Value) -> Value {
        self.get(node, keys).cloned().unwrap_or(default)
    }

    pub fn must_get(&self, node: NodeId, keys: impl IntoKeySpec) -> Option<&Value> {
        let spec = keys.into_key_spec();
        must(self.try_get(node, &spec), &spec)
    }

    // Strings

    /// The first match rendered as text; a node without a value gives `""`.
    pub fn try_get_string(&self, node: NodeId, keys: impl IntoKeySpec) -> Result<String, TreeError> {
        let found = self.try_get_node(node, keys)?;
        Ok(self.string_value(found))
    }

    pub fn get_string(&self, node: NodeId, keys: impl IntoKeySpec) -> String {
        self.try_get_string(node, keys).unwrap_or_default()
    }

    pub fn get_string_or(&self, node: NodeId, keys: impl IntoKeySpec, default: &str) -> String {
        self.try_get_string(node, keys)
            .unwrap_or_else(|_| default.to_string())
    }

    pub fn must_get_string(&self, node: NodeId, keys: impl IntoKeySpec) -> String {
        let spec = keys.into_key_spec();
        must(self.try_get_string(node, &spec), &spec)
    }

    // Integers

    pub fn try_get_int(&self, node: NodeId, keys: impl IntoKeySpec) -> Result<i64, TreeError> {
        self.try_convert(node, &keys.into_key_spec(), Value::to_int)
    }

    pub fn get_int(&self, node: NodeId, keys: impl IntoKeySpec) -> i64 {
        self.try_get_int(node, keys).unwrap_or_default()
    }

    pub fn get_int_or(&self, node: NodeId, keys: impl IntoKeySpec, default: i64) -> i64 {
        self.try_get_int(node, keys).unwrap_or(default)
    }

    pub fn must_get_int(&self, node: NodeId, keys: impl IntoKeySpec) -> i64 {
        let spec = keys.into_key_spec();
        must(self.try_get_int(node, &spec), &spec)
    }

    // Floats

    pub fn try_get_float(&self, node: NodeId, keys: impl IntoKeySpec) -> Result<f64, TreeError> {
        self.try_convert(node, &keys.into_key_spec(), Value::to_float)
    }

    pub fn get_float(&self, node: NodeId, keys: impl IntoKeySpec) -> f64 {
        self.try_get_float(node, keys).unwrap_or_default()
    }

    pub fn get_float_or(&self, node: NodeId, keys: impl IntoKeySpec, default: f64) -> f64 {
        self.try_get_float(node, keys).unwrap_or(default)
    }

    pub fn must_get_float(&self, node: NodeId, keys: impl IntoKeySpec) -> f64 {
        let spec = keys.into_key_spec();
        must(self.try_get_float(node, &spec), &spec)
    }

    // Booleans

    pub fn try_get_bool(&self, node: NodeId, keys: impl IntoKeySpec) -> Result<bool, TreeError> {
        self.try_convert(node, &keys.into_key_spec(), Value::to_bool)
    }

    pub fn get_bool(&self, node: NodeId, keys: impl IntoKeySpec) -> bool {
        self.try_get_bool(node, keys).unwrap_or_default()
    }

    pub fn get_bool_or(&self, node: NodeId, keys: impl IntoKeySpec, default: bool) -> bool {
        self.try_get_bool(node, keys).unwrap_or(default)
    }

    pub fn must_get_bool(&self, node: NodeId, keys: impl IntoKeySpec) -> bool {
        let spec = keys.into_key_spec();
        must(self.try_get_bool(node, &spec), &spec)
    }

    // Durations

    pub fn try_get_duration(
        &self,
        node: NodeId,
        keys: impl IntoKeySpec,
    ) -> Result<Duration, TreeError> {
        self.try_convert(node, &keys.into_key_spec(), Value::to_duration)
    }

    pub fn get_duration(&self, node: NodeId, keys: impl IntoKeySpec) -> Duration {
        self.try_get_duration(node, keys).unwrap_or_default()
    }

    pub fn get_duration_or(&self, node: NodeId, keys: impl IntoKeySpec, default: Duration) -> Duration {
        self.try_get_duration(node, keys).unwrap_or(default)
    }

    pub fn must_get_duration(&self, node: NodeId, keys: impl IntoKeySpec) -> Duration {
        let spec = keys.into_key_spec();
        must(self.try_get_duration(node, &spec), &spec)
    }

    // Times

    pub fn try_get_time(
        &self,
        node: NodeId,
        keys: impl IntoKeySpec,
    ) -> Result<DateTime<Utc>, TreeError> {
        self.try_convert(node, &keys.into_key_spec(), Value::to_time)
    }

    pub fn get_time(&self, node: NodeId, keys: impl IntoKeySpec) -> DateTime<Utc> {
        self.try_get_time(node, keys).unwrap_or_default()
    }

    pub fn get_time_or(
        &self,
        node: NodeId,
        keys: impl IntoKeySpec,
        default: DateTime<Utc>,
    ) -> DateTime<Utc> {
        self.try_get_time(node, keys).unwrap_or(default)
    }

    pub fn must_get_time(&self, node: NodeId, keys: impl IntoKeySpec) -> DateTime<Utc> {
        let spec = keys.into_key_spec();
        must(self.try_get_time(node, &spec), &spec)
    }

    // Collections

    /// Values of every matching leaf. Interior nodes and leaves without a value
    /// are skipped.
    pub fn get_values(&self, node: NodeId, keys: impl IntoKeySpec) -> Vec<Value> {
        self.get_nodes(node, keys)
            .iter()
            .filter(|&id| self.is_leaf(id))
            .filter_map(|id| self.value(id).cloned())
            .collect()
    }

    /// Every matching node rendered as text.
    pub fn get_string_values(&self, node: NodeId, keys: impl IntoKeySpec) -> Vec<String> {
        self.get_nodes(node, keys)
            .iter()
            .map(|id| self.string_value(id))
            .collect()
    }

    /// Map for a spec like `*.*.common.region.*.name`: the key of the node matched
    /// by the last `*` maps to the text of whatever follows it.
    ///
    /// An empty spec behaves like `*`.
    pub fn get_map(&self, node: NodeId, keys: impl IntoKeySpec) -> Args {
        let mut spec = keys.into_key_spec();
        if spec.is_empty() {
            spec.push(WILDCARD);
        }
        let (head, tail) = spec.split_at_last_wildcard();

        let mut result = Args::new();
        for matched in self.resolve(node, &head, None) {
            let Some(key) = self.key(matched).map(str::to_string) else {
                continue;
            };
            let target = if tail.is_empty() {
                Some(matched)
            } else {
                self.find_first(matched, &tail).ok()
            };
            if let Some(target) = target {
                result.insert(key, self.string_value(target));
            }
        }
        result
    }

    /// Like [`Tree::get_map`], with plain strings.
    pub fn get_string_map(&self, node: NodeId, keys: impl IntoKeySpec) -> StrArgs {
        self.get_map(node, keys)
            .iter()
            .map(|(key, value)| (key.clone(), value.to_text()))
            .collect()
    }
}
