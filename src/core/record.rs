//! Record assembly and fail-safe serialization
//!
//! One `build` call produces one serialized JSON line. Assembly follows a
//! fixed precedence: per-call fields first, construction-time context
//! overriding them, then the identity slots (level, message, location,
//! time, tags) written last. Any serialization failure is converted into
//! a replacement ERROR record, so `build` never fails.

use crate::core::caller::{CallerLocation, DEFAULT_LOCATION_FORMAT};
use crate::core::context::{AdapterContext, LogFields};
use crate::core::error::{Result, ShaperError};
use crate::core::log_level::LogLevel;
use crate::core::template::safe_substitute;
use crate::core::timestamp::TimestampFormat;
use serde_json::{Map, Value};

/// Names of the five core record slots.
///
/// Shared by all calls on an adapter instance; override them through the
/// adapter builder when the defaults collide with your own field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub message: String,
    pub level: String,
    pub location: String,
    pub tags: String,
    pub time: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            message: "msg".to_string(),
            level: "level".to_string(),
            location: "loc".to_string(),
            tags: "tags".to_string(),
            time: "time".to_string(),
        }
    }
}

impl FieldNames {
    /// Reject empty or colliding slot names.
    pub fn validate(&self) -> Result<()> {
        let names = [
            &self.message,
            &self.level,
            &self.location,
            &self.tags,
            &self.time,
        ];
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ShaperError::config("FieldNames", "slot name must not be empty"));
            }
            if names[..i].contains(name) {
                return Err(ShaperError::config(
                    "FieldNames",
                    format!("duplicate slot name '{}'", name),
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of assembling one record.
enum Serialized {
    Ok(String),
    Failed {
        error: String,
        location: Option<String>,
    },
}

/// Shapes one log call into a serialized record.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    field_names: FieldNames,
    timestamp_format: TimestampFormat,
    location_format: String,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self {
            field_names: FieldNames::default(),
            timestamp_format: TimestampFormat::default(),
            location_format: DEFAULT_LOCATION_FORMAT.to_string(),
        }
    }
}

impl RecordBuilder {
    pub fn new(
        field_names: FieldNames,
        timestamp_format: TimestampFormat,
        location_format: String,
    ) -> Self {
        Self {
            field_names,
            timestamp_format,
            location_format,
        }
    }

    pub fn field_names(&self) -> &FieldNames {
        &self.field_names
    }

    /// Assemble and serialize one record. Never fails: serialization
    /// problems degrade to the fallback ERROR record.
    pub fn build(
        &self,
        context: &AdapterContext,
        level: LogLevel,
        template: &str,
        tags: &[&str],
        fields: LogFields,
        caller: Option<CallerLocation>,
    ) -> String {
        let rendered_loc = caller.map(|c| c.render(&self.location_format));

        match self.assemble(context, level, template, tags, fields, rendered_loc.clone()) {
            Serialized::Ok(payload) => payload,
            Serialized::Failed { error, location } => self.fallback_record(&error, location),
        }
    }

    fn assemble(
        &self,
        context: &AdapterContext,
        level: LogLevel,
        template: &str,
        tags: &[&str],
        fields: LogFields,
        rendered_loc: Option<String>,
    ) -> Serialized {
        let (mut record, field_error) = fields.into_map();
        if let Some(error) = field_error {
            return Serialized::Failed {
                error,
                location: rendered_loc,
            };
        }

        // Construction-time context wins over per-call fields
        match context.materialize() {
            Ok(merged) => {
                for (key, value) in merged {
                    record.insert(key, value);
                }
            }
            Err(error) => {
                return Serialized::Failed {
                    error,
                    location: rendered_loc,
                };
            }
        }

        let names = &self.field_names;
        record.insert(
            names.level.clone(),
            Value::String(level.to_str().to_string()),
        );

        // Placeholders see context fields and the level label, but not
        // the message slot itself
        let message = safe_substitute(template, &record);
        record.insert(names.message.clone(), Value::String(message));

        if let Some(loc) = rendered_loc {
            record.insert(names.location.clone(), Value::String(loc));
        }

        record.insert(
            names.time.clone(),
            Value::String(self.timestamp_format.now()),
        );

        if !tags.is_empty() {
            record.insert(
                names.tags.clone(),
                Value::Array(tags.iter().map(|t| Value::String(t.to_string())).collect()),
            );
        }

        // Display on Value is infallible, so serialization itself cannot
        // fail once every field is a Value
        Serialized::Ok(Value::Object(record).to_string())
    }

    fn fallback_record(&self, error: &str, location: Option<String>) -> String {
        let message = match location {
            Some(loc) => format!("LOGGER EXCEPTION \"{}\" in {}", error, loc),
            None => format!("LOGGER EXCEPTION \"{}\"", error),
        };

        let mut record = Map::new();
        record.insert(
            self.field_names.message.clone(),
            Value::String(message),
        );
        record.insert(
            self.field_names.level.clone(),
            Value::String(LogLevel::Error.to_str().to_string()),
        );
        Value::Object(record).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::{Serialize, Serializer};
    use serde_json::json;

    /// A value whose Serialize impl always fails.
    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("no textual form"))
        }
    }

    fn parse(record: &str) -> Map<String, Value> {
        match serde_json::from_str(record).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_simple_statement() {
        let builder = RecordBuilder::default();
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Debug,
            "simple log statement",
            &[],
            LogFields::new(),
            None,
        );

        let parsed = parse(&record);
        assert_eq!(parsed["msg"], json!("simple log statement"));
        assert_eq!(parsed["level"], json!("DEBUG"));
        assert!(parsed.contains_key("time"));
        assert!(!parsed.contains_key("loc"));
        assert!(!parsed.contains_key("tags"));
    }

    #[test]
    fn test_message_substitution_from_call_fields() {
        let builder = RecordBuilder::default();
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Info,
            "user $id logged in",
            &[],
            LogFields::new().with_field("id", 42),
            None,
        );

        let parsed = parse(&record);
        assert_eq!(parsed["msg"], json!("user 42 logged in"));
        assert_eq!(parsed["level"], json!("INFO"));
        assert_eq!(parsed["id"], json!(42));
    }

    #[test]
    fn test_placeholder_can_reference_level_label() {
        let builder = RecordBuilder::default();
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Warning,
            "at $level",
            &[],
            LogFields::new(),
            None,
        );

        assert_eq!(parse(&record)["msg"], json!("at WARNING"));
    }

    #[test]
    fn test_constants_override_call_fields() {
        let mut context = AdapterContext::new();
        context.add_constant("app", "X");

        let builder = RecordBuilder::default();
        let record = builder.build(
            &context,
            LogLevel::Info,
            "",
            &[],
            LogFields::new().with_field("app", "Y"),
            None,
        );

        assert_eq!(parse(&record)["app"], json!("X"));
    }

    #[test]
    fn test_tags_verbatim_and_ordered() {
        let builder = RecordBuilder::default();
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Debug,
            "",
            &["a", "b"],
            LogFields::new(),
            None,
        );

        assert_eq!(parse(&record)["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_location_slot_rendered() {
        let builder = RecordBuilder::default();
        let caller = CallerLocation::new("app::web", "serve", 17, "src/web.rs");
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Info,
            "",
            &[],
            LogFields::new(),
            Some(caller),
        );

        assert_eq!(parse(&record)["loc"], json!("app::web:serve:17"));
    }

    #[test]
    fn test_location_cannot_be_overridden_by_call_fields() {
        let builder = RecordBuilder::default();
        let caller = CallerLocation::new("real", "site", 1, "real.rs");
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Info,
            "",
            &[],
            LogFields::new().with_field("loc", "spoofed"),
            Some(caller),
        );

        assert_eq!(parse(&record)["loc"], json!("real:site:1"));
    }

    #[test]
    fn test_custom_field_names() {
        let names = FieldNames {
            message: "m".to_string(),
            level: "l".to_string(),
            location: "from".to_string(),
            tags: "t".to_string(),
            time: "@".to_string(),
        };
        let builder = RecordBuilder::new(
            names,
            TimestampFormat::default(),
            DEFAULT_LOCATION_FORMAT.to_string(),
        );

        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Debug,
            "hello",
            &["x"],
            LogFields::new(),
            None,
        );

        let parsed = parse(&record);
        assert_eq!(parsed["m"], json!("hello"));
        assert_eq!(parsed["l"], json!("DEBUG"));
        assert_eq!(parsed["t"], json!(["x"]));
        assert!(parsed.contains_key("@"));
    }

    #[test]
    fn test_unencodable_value_yields_fallback_record() {
        let builder = RecordBuilder::default();
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Info,
            "fine otherwise",
            &[],
            LogFields::new().with_field("bad", Unencodable),
            Some(CallerLocation::new("app", "main", 3, "src/main.rs")),
        );

        let parsed = parse(&record);
        assert_eq!(parsed["level"], json!("ERROR"));
        let msg = parsed["msg"].as_str().unwrap();
        assert!(msg.starts_with("LOGGER EXCEPTION"));
        assert!(msg.contains("no textual form"));
        assert!(msg.contains("app:main:3"));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_fallback_without_location() {
        let builder = RecordBuilder::default();
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Info,
            "",
            &[],
            LogFields::new().with_field("bad", Unencodable),
            None,
        );

        let parsed = parse(&record);
        assert_eq!(parsed["level"], json!("ERROR"));
        assert!(!parsed["msg"].as_str().unwrap().contains(" in "));
    }

    #[test]
    fn test_field_names_validation() {
        assert!(FieldNames::default().validate().is_ok());

        let mut dup = FieldNames::default();
        dup.level = "msg".to_string();
        assert!(matches!(
            dup.validate(),
            Err(ShaperError::InvalidConfiguration { .. })
        ));

        let mut empty = FieldNames::default();
        empty.time = String::new();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_call_fields_precede_core_slots_in_output() {
        let builder = RecordBuilder::default();
        let record = builder.build(
            &AdapterContext::new(),
            LogLevel::Info,
            "",
            &[],
            LogFields::new().with_field("first", 1),
            None,
        );

        let parsed = parse(&record);
        let keys: Vec<&String> = parsed.keys().collect();
        assert_eq!(keys[0], "first");
        assert_eq!(keys[1], "level");
        assert_eq!(keys[2], "msg");
    }
}
