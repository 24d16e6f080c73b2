//! Terminal colorization of serialized records
//!
//! The renderer post-processes an already-serialized record. It never
//! touches records headed anywhere but an interactive terminal, and it
//! never touches multi-line payloads, which are assumed pre-formatted.

use crate::core::log_level::LogLevel;
use crate::core::template::value_to_string;
use crate::render::color::{bold, ColorTable};
use crate::core::error::Result;
use serde_json::{Map, Value};

/// How a colorized record is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Keep the serialized shape, inserting style escapes around the
    /// message value and each key
    #[default]
    Structured,
    /// Discard the shape and rebuild as `LEVEL: message [key] value`
    Plain,
}

/// Colorizes serialized records by severity.
///
/// Styling comes from a [`ColorTable`]; levels with no entry render
/// unstyled. The renderer needs to know the adapter's message and level
/// slot names so renamed slots still colorize correctly.
#[derive(Debug, Clone)]
pub struct ColorRenderer {
    table: ColorTable,
    mode: RenderMode,
    message_key: String,
    level_key: String,
}

impl Default for ColorRenderer {
    fn default() -> Self {
        Self::structured()
    }
}

impl ColorRenderer {
    /// Structure-preserving renderer with the default color table
    pub fn structured() -> Self {
        Self::new(RenderMode::Structured)
    }

    /// Plain-reformat renderer with the default color table
    pub fn plain() -> Self {
        Self::new(RenderMode::Plain)
    }

    pub fn new(mode: RenderMode) -> Self {
        Self {
            table: ColorTable::default(),
            mode,
            message_key: "msg".to_string(),
            level_key: "level".to_string(),
        }
    }

    /// Use a specific color table (shared with other renderer handles)
    #[must_use]
    pub fn with_table(mut self, table: ColorTable) -> Self {
        self.table = table;
        self
    }

    /// Match the adapter's configured message and level slot names
    #[must_use]
    pub fn with_record_keys(
        mut self,
        message_key: impl Into<String>,
        level_key: impl Into<String>,
    ) -> Self {
        self.message_key = message_key.into();
        self.level_key = level_key.into();
        self
    }

    /// Reconfigure a level's style; see [`ColorTable::set_color`]
    pub fn set_color(
        &self,
        level: &str,
        bg: Option<&str>,
        fg: Option<&str>,
        bold: bool,
    ) -> Result<()> {
        self.table.set_color(level, bg, fg, bold)
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.table
    }

    /// Colorize one serialized record.
    ///
    /// Returns the input byte-for-byte when the destination is not an
    /// interactive terminal, when the record spans multiple lines, or
    /// when it does not decode as a JSON object.
    pub fn render(&self, record: &str, level: LogLevel, is_tty: bool) -> String {
        if !is_tty || record.trim().contains('\n') {
            return record.to_string();
        }

        let decoded: Map<String, Value> = match serde_json::from_str(record) {
            Ok(Value::Object(map)) => map,
            _ => return record.to_string(),
        };

        match self.mode {
            RenderMode::Structured => self.render_structured(record, &decoded, level),
            RenderMode::Plain => self.render_plain(record, &decoded, level),
        }
    }

    /// Re-embed styled fragments into the original serialized text by
    /// quoted-substring replacement.
    ///
    /// Known limitation: this is textual substitution, not structural
    /// re-encoding. If the same quoted text occurs more than once in the
    /// payload, every occurrence is restyled.
    fn render_structured(
        &self,
        record: &str,
        decoded: &Map<String, Value>,
        level: LogLevel,
    ) -> String {
        let mut out = record.to_string();

        if let Some(style) = self.table.style_for(level) {
            if !style.sgr_params().is_empty() {
                if let Some(message) = decoded.get(&self.message_key) {
                    let quoted = format!("\"{}\"", value_to_string(message));
                    out = out.replace(&quoted, &style.paint(&quoted));
                }
            }
        }

        for key in decoded.keys() {
            let plain = format!("\"{}\":", key);
            let styled = format!("\"{}\":", bold(key));
            out = out.replace(&plain, &styled);
        }

        out
    }

    /// Rebuild the line as `<styled-level>: <message>` plus bolded
    /// `[key] value` pairs in original field order.
    fn render_plain(
        &self,
        record: &str,
        decoded: &Map<String, Value>,
        level: LogLevel,
    ) -> String {
        let mut out = match decoded.get(&self.level_key) {
            Some(label) => {
                let label = value_to_string(label);
                let message = decoded
                    .get(&self.message_key)
                    .map(value_to_string)
                    .unwrap_or_default();
                let styled = match self.table.style_for(level) {
                    Some(style) => style.paint(&label),
                    None => label,
                };
                format!("{}: {}", styled, message)
            }
            // No level slot to anchor on: keep the serialized text
            None => record.to_string(),
        };

        for (key, value) in decoded {
            if *key == self.level_key || *key == self.message_key {
                continue;
            }
            out.push_str(&format!(" [{}] {}", bold(key), value_to_string(value)));
        }

        out
    }
}
