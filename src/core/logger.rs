//! The adapter front: level-named calls over a pluggable backend

use crate::core::backend::Backend;
use crate::core::caller::{CallerLocation, DEFAULT_LOCATION_FORMAT};
use crate::core::context::{AdapterContext, LogFields};
use crate::core::error::Result;
use crate::core::log_level::LogLevel;
use crate::core::record::{FieldNames, RecordBuilder};
use crate::core::timestamp::TimestampFormat;
use serde::Serialize;
use std::sync::Arc;

/// A structured-logging adapter.
///
/// Long-lived: construct once via [`Shaper::builder`], then call the
/// level methods (or the crate's level macros, which also capture the
/// full caller location) from any thread. Every call shapes one record
/// and hands the serialized line to the backend; no call ever fails.
pub struct Shaper {
    backend: Arc<dyn Backend>,
    context: AdapterContext,
    builder: RecordBuilder,
}

impl Shaper {
    /// Create a builder for the adapter
    pub fn builder(backend: Arc<dyn Backend>) -> ShaperBuilder {
        ShaperBuilder::new(backend)
    }

    /// Generic entry point with an explicit level.
    #[track_caller]
    pub fn log(&self, level: LogLevel, template: &str, tags: &[&str], fields: LogFields) {
        let caller = CallerLocation::capture();
        self.log_located(level, template, tags, fields, Some(caller));
    }

    /// Entry point with an explicitly captured caller location.
    ///
    /// The level macros route here with the location captured at their
    /// expansion site.
    pub fn log_located(
        &self,
        level: LogLevel,
        template: &str,
        tags: &[&str],
        fields: LogFields,
        caller: Option<CallerLocation>,
    ) {
        // Enablement first: assembly and provider invocation are not free
        if !self.backend.is_enabled(level) {
            return;
        }

        let record = self
            .builder
            .build(&self.context, level, template, tags, fields, caller);
        self.backend.write(level, &record);
    }

    #[track_caller]
    pub fn trace(&self, template: &str, tags: &[&str], fields: LogFields) {
        self.log_located(
            LogLevel::Trace,
            template,
            tags,
            fields,
            Some(CallerLocation::capture()),
        );
    }

    #[track_caller]
    pub fn debug(&self, template: &str, tags: &[&str], fields: LogFields) {
        self.log_located(
            LogLevel::Debug,
            template,
            tags,
            fields,
            Some(CallerLocation::capture()),
        );
    }

    #[track_caller]
    pub fn info(&self, template: &str, tags: &[&str], fields: LogFields) {
        self.log_located(
            LogLevel::Info,
            template,
            tags,
            fields,
            Some(CallerLocation::capture()),
        );
    }

    #[track_caller]
    pub fn warning(&self, template: &str, tags: &[&str], fields: LogFields) {
        self.log_located(
            LogLevel::Warning,
            template,
            tags,
            fields,
            Some(CallerLocation::capture()),
        );
    }

    #[track_caller]
    pub fn error(&self, template: &str, tags: &[&str], fields: LogFields) {
        self.log_located(
            LogLevel::Error,
            template,
            tags,
            fields,
            Some(CallerLocation::capture()),
        );
    }

    #[track_caller]
    pub fn critical(&self, template: &str, tags: &[&str], fields: LogFields) {
        self.log_located(
            LogLevel::Critical,
            template,
            tags,
            fields,
            Some(CallerLocation::capture()),
        );
    }

    /// The configured core slot names
    pub fn field_names(&self) -> &FieldNames {
        self.builder.field_names()
    }
}

/// Builder for [`Shaper`] with a fluent API
///
/// # Example
/// ```
/// use logshaper::prelude::*;
/// use std::sync::Arc;
///
/// let shaper = Shaper::builder(Arc::new(ConsoleBackend::new()))
///     .constant("app", "api-gateway")
///     .provider("seq", || 7_u64)
///     .timestamp_format(TimestampFormat::UnixMillis)
///     .build()
///     .unwrap();
///
/// shaper.info("started on port $port", &[], LogFields::new().with_field("port", 8080));
/// ```
pub struct ShaperBuilder {
    backend: Arc<dyn Backend>,
    context: AdapterContext,
    field_names: FieldNames,
    timestamp_format: TimestampFormat,
    location_format: String,
}

impl ShaperBuilder {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            context: AdapterContext::new(),
            field_names: FieldNames::default(),
            timestamp_format: TimestampFormat::default(),
            location_format: DEFAULT_LOCATION_FORMAT.to_string(),
        }
    }

    /// Bind a constant context field, merged into every record
    #[must_use = "builder methods return a new value"]
    pub fn constant<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Serialize,
    {
        self.context.add_constant(key, value);
        self
    }

    /// Register a dynamic context field, re-evaluated on every record
    #[must_use = "builder methods return a new value"]
    pub fn provider<K, F, V>(mut self, key: K, provider: F) -> Self
    where
        K: Into<String>,
        F: Fn() -> V + Send + Sync + 'static,
        V: Serialize,
    {
        self.context.add_provider(key, provider);
        self
    }

    /// Override the names of the five core record slots
    #[must_use = "builder methods return a new value"]
    pub fn field_names(mut self, names: FieldNames) -> Self {
        self.field_names = names;
        self
    }

    /// Set the time slot format
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set the location slot template (default `$module:$method:$line`)
    #[must_use = "builder methods return a new value"]
    pub fn location_format(mut self, template: impl Into<String>) -> Self {
        self.location_format = template.into();
        self
    }

    /// Build the adapter, validating the slot-name configuration
    pub fn build(self) -> Result<Shaper> {
        self.field_names.validate()?;
        Ok(Shaper {
            backend: self.backend,
            context: self.context,
            builder: RecordBuilder::new(
                self.field_names,
                self.timestamp_format,
                self.location_format,
            ),
        })
    }
}
