//! Core adapter types

pub mod backend;
pub mod caller;
pub mod context;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod template;
pub mod timestamp;

pub use backend::Backend;
pub use caller::{CallerLocation, DEFAULT_LOCATION_FORMAT};
pub use context::{AdapterContext, LogFields};
pub use error::{Result, ShaperError};
pub use log_level::LogLevel;
pub use logger::{Shaper, ShaperBuilder};
pub use record::{FieldNames, RecordBuilder};
pub use template::safe_substitute;
pub use timestamp::TimestampFormat;
