//! Context fields merged into log records
//!
//! This module provides:
//! - `LogFields`: per-call keyword context
//! - `AdapterContext`: construction-time constants and dynamic providers
//!
//! Both accept any `Serialize` value and convert it to `serde_json::Value`
//! eagerly. A conversion failure is captured, not returned: the record
//! builder turns it into the fallback ERROR record, so no log call ever
//! fails in the caller's hands.

use serde::Serialize;
use serde_json::{Map, Value};

/// Per-call structured fields, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LogFields {
    fields: Map<String, Value>,
    error: Option<String>,
}

impl LogFields {
    /// Create an empty field set
    pub fn new() -> Self {
        Self {
            fields: Map::new(),
            error: None,
        }
    }

    /// Add a field, consuming and returning the set
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Serialize,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field in place
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Serialize,
    {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(v) => {
                self.fields.insert(key, v);
            }
            Err(e) => {
                // First failure wins; the record builder reports it
                if self.error.is_none() {
                    self.error = Some(format!("field '{}': {}", key, e));
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_map(self) -> (Map<String, Value>, Option<String>) {
        (self.fields, self.error)
    }
}

type Provider = Box<dyn Fn() -> Result<Value, String> + Send + Sync>;

/// Construction-time context: constants bound once, providers invoked
/// fresh on every materialization.
///
/// Registration happens through the adapter builder and the entry set is
/// write-once afterward. The two kinds are registered through separate
/// paths; there is no runtime classification of values.
#[derive(Default)]
pub struct AdapterContext {
    constants: Map<String, Value>,
    constant_error: Option<String>,
    providers: Vec<(String, Provider)>,
}

impl AdapterContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a constant field
    pub fn add_constant<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Serialize,
    {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(v) => {
                self.constants.insert(key, v);
            }
            Err(e) => {
                if self.constant_error.is_none() {
                    self.constant_error = Some(format!("constant '{}': {}", key, e));
                }
            }
        }
    }

    /// Register a dynamic field, invoked once per log call
    pub fn add_provider<K, F, V>(&mut self, key: K, provider: F)
    where
        K: Into<String>,
        F: Fn() -> V + Send + Sync + 'static,
        V: Serialize,
    {
        let key = key.into();
        let key_for_error = key.clone();
        self.providers.push((
            key,
            Box::new(move || {
                serde_json::to_value(provider())
                    .map_err(|e| format!("provider '{}': {}", key_for_error, e))
            }),
        ));
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty() && self.providers.is_empty()
    }

    /// Materialize constants plus fresh provider results.
    ///
    /// Each provider runs exactly once per call. Providers registered
    /// under a constant's name win, matching the general rule that later
    /// assembly steps override earlier ones.
    pub fn materialize(&self) -> Result<Map<String, Value>, String> {
        if let Some(err) = &self.constant_error {
            return Err(err.clone());
        }

        let mut merged = self.constants.clone();
        for (key, provider) in &self.providers {
            merged.insert(key.clone(), provider()?);
        }
        Ok(merged)
    }
}

impl std::fmt::Debug for AdapterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterContext")
            .field("constants", &self.constants)
            .field("providers", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_log_fields_insertion_order() {
        let fields = LogFields::new()
            .with_field("zebra", 1)
            .with_field("apple", 2);

        let (map, error) = fields.into_map();
        assert!(error.is_none());
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["zebra", "apple"]);
    }

    #[test]
    fn test_log_fields_capture_conversion_error() {
        // Maps with non-string keys have no JSON representation
        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![1, 2], "x");

        let fields = LogFields::new().with_field("broken", bad);
        let (map, error) = fields.into_map();
        assert!(map.is_empty());
        assert!(error.unwrap().contains("broken"));
    }

    #[test]
    fn test_materialize_constants() {
        let mut ctx = AdapterContext::new();
        ctx.add_constant("pid", 12345);
        ctx.add_constant("app", "APP NAME");

        let merged = ctx.materialize().unwrap();
        assert_eq!(merged["pid"], json!(12345));
        assert_eq!(merged["app"], json!("APP NAME"));
    }

    #[test]
    fn test_providers_run_fresh_each_call() {
        let counter = Arc::new(AtomicU64::new(0));
        let counter_clone = Arc::clone(&counter);

        let mut ctx = AdapterContext::new();
        ctx.add_provider("seq", move || {
            counter_clone.fetch_add(1, Ordering::SeqCst) + 1
        });

        assert_eq!(ctx.materialize().unwrap()["seq"], json!(1));
        assert_eq!(ctx.materialize().unwrap()["seq"], json!(2));
    }

    #[test]
    fn test_constant_error_surfaces_on_materialize() {
        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![0u8], 1);

        let mut ctx = AdapterContext::new();
        ctx.add_constant("broken", bad);

        let err = ctx.materialize().unwrap_err();
        assert!(err.contains("broken"));
    }
}
