//! Console backend implementation

use crate::core::{Backend, LogLevel};
use crate::render::ColorRenderer;
use parking_lot::RwLock;
use std::io::{IsTerminal, Write};

/// Writes records to stdout, routing Error and Critical to stderr.
///
/// Owns the minimum-level enablement check. When a renderer is attached,
/// records headed for an interactive terminal are colorized before they
/// are written; redirected streams receive the serialized record
/// untouched.
pub struct ConsoleBackend {
    min_level: RwLock<LogLevel>,
    renderer: Option<ColorRenderer>,
}

impl ConsoleBackend {
    pub fn new() -> Self {
        Self {
            min_level: RwLock::new(LogLevel::Info),
            renderer: None,
        }
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        *self.min_level.get_mut() = level;
        self
    }

    /// Attach a colorizing renderer for interactive terminals
    #[must_use]
    pub fn with_renderer(mut self, renderer: ColorRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Change the minimum enabled level at runtime
    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ConsoleBackend {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    fn write(&self, level: LogLevel, record: &str) {
        match level {
            LogLevel::Error | LogLevel::Critical => {
                let stderr = std::io::stderr();
                let line = match &self.renderer {
                    Some(r) => r.render(record, level, stderr.is_terminal()),
                    None => record.to_string(),
                };
                // A full stderr is not something a logger can report
                let _ = writeln!(stderr.lock(), "{}", line);
            }
            _ => {
                let stdout = std::io::stdout();
                let line = match &self.renderer {
                    Some(r) => r.render(record, level, stdout.is_terminal()),
                    None => record.to_string(),
                };
                let _ = writeln!(stdout.lock(), "{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_level_enablement() {
        let backend = ConsoleBackend::new().with_min_level(LogLevel::Warning);
        assert!(!backend.is_enabled(LogLevel::Trace));
        assert!(!backend.is_enabled(LogLevel::Info));
        assert!(backend.is_enabled(LogLevel::Warning));
        assert!(backend.is_enabled(LogLevel::Critical));
    }

    #[test]
    fn test_set_min_level_at_runtime() {
        let backend = ConsoleBackend::new();
        assert!(!backend.is_enabled(LogLevel::Debug));
        backend.set_min_level(LogLevel::Trace);
        assert!(backend.is_enabled(LogLevel::Debug));
    }

    #[test]
    fn test_write_does_not_panic() {
        let backend = ConsoleBackend::new().with_renderer(ColorRenderer::structured());
        backend.write(LogLevel::Info, r#"{"msg":"hello","level":"INFO"}"#);
        backend.write(LogLevel::Error, r#"{"msg":"bad","level":"ERROR"}"#);
    }
}
