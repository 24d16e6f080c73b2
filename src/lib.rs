//! # Logshaper
//!
//! A structured-logging adapter: each leveled call (message template +
//! tags + keyword context) is shaped into one serialized JSON record, or
//! a colorized human-readable line when the sink is an interactive
//! terminal.
//!
//! ## Features
//!
//! - **Message templates**: safe `$name` substitution that never fails
//! - **Context fields**: constants bound once, providers re-evaluated
//!   per call
//! - **Caller locations**: captured at compile time at the call site
//! - **Fail-safe**: a record that cannot be serialized degrades to a
//!   visible ERROR record instead of raising
//! - **Terminal colors**: severity-styled output in two presentation
//!   modes, with a validated per-level color table
//!
//! Level filtering and stream writing stay behind the [`Backend`] seam;
//! a [`ConsoleBackend`] reference implementation ships with the crate.
//!
//! ```
//! use logshaper::prelude::*;
//! use logshaper::info;
//! use std::sync::Arc;
//!
//! let backend = ConsoleBackend::new()
//!     .with_min_level(LogLevel::Debug)
//!     .with_renderer(ColorRenderer::structured());
//!
//! let log = Shaper::builder(Arc::new(backend))
//!     .constant("app", "api-gateway")
//!     .build()
//!     .unwrap();
//!
//! info!(log, "user $id logged in", &["auth"], LogFields::new().with_field("id", 42));
//! ```

pub mod backends;
pub mod core;
pub mod macros;
pub mod render;

pub mod prelude {
    pub use crate::backends::ConsoleBackend;
    pub use crate::core::{
        Backend, CallerLocation, FieldNames, LogFields, LogLevel, Result, Shaper, ShaperBuilder,
        ShaperError, TimestampFormat,
    };
    pub use crate::render::{Color, ColorRenderer, ColorTable, RenderMode, Style};
}

pub use crate::backends::ConsoleBackend;
pub use crate::core::{
    safe_substitute, AdapterContext, Backend, CallerLocation, FieldNames, LogFields, LogLevel,
    RecordBuilder, Result, Shaper, ShaperBuilder, ShaperError, TimestampFormat,
    DEFAULT_LOCATION_FORMAT,
};
pub use crate::render::{Color, ColorRenderer, ColorTable, RenderMode, Style};
