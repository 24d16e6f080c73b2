//! Caller location capture and rendering
//!
//! Locations are captured at compile time at the call site: the level
//! macros record the full `module / method / line / file` tuple at their
//! expansion site, which is by construction the first frame outside this
//! crate no matter how many wrapper layers sit in between. The inherent
//! level methods are `#[track_caller]` and capture file and line through
//! `std::panic::Location`; the enclosing function name is not recoverable
//! there, so the method slot stays empty and the module slot falls back
//! to the source file stem.

use crate::core::template::safe_substitute;
use serde_json::{Map, Value};
use std::panic::Location;
use std::path::Path;

/// Default rendering template for the location slot.
pub const DEFAULT_LOCATION_FORMAT: &str = "$module:$method:$line";

/// The resolved origin of a log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    pub module: String,
    pub method: String,
    pub line: u32,
    pub file: String,
}

impl CallerLocation {
    pub fn new(
        module: impl Into<String>,
        method: impl Into<String>,
        line: u32,
        file: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            method: method.into(),
            line,
            file: file.into(),
        }
    }

    /// Capture the immediate caller's file and line.
    ///
    /// Used by the inherent level methods; the level macros capture a
    /// richer location at their expansion site instead.
    #[track_caller]
    pub fn capture() -> Self {
        let loc = Location::caller();
        let module = Path::new(loc.file())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        Self {
            module,
            method: String::new(),
            line: loc.line(),
            file: loc.file().to_string(),
        }
    }

    /// Render through a location template using safe substitution over
    /// the `module`, `method`, `line` and `file` slots.
    pub fn render(&self, template: &str) -> String {
        let mut context = Map::new();
        context.insert("module".to_string(), Value::String(self.module.clone()));
        context.insert("method".to_string(), Value::String(self.method.clone()));
        context.insert("line".to_string(), Value::Number(self.line.into()));
        context.insert("file".to_string(), Value::String(self.file.clone()));
        safe_substitute(template, &context)
    }
}
