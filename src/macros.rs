//! Logging macros that capture the caller location at the call site.
//!
//! The macros expand at the point of use, so the recorded location names
//! the true caller no matter how many wrapper layers exist inside the
//! crate. This is the compile-time equivalent of scanning the call stack
//! for the first frame outside the logging library.
//!
//! # Examples
//!
//! ```
//! use logshaper::prelude::*;
//! use logshaper::{info, warning};
//! use std::sync::Arc;
//!
//! let log = Shaper::builder(Arc::new(ConsoleBackend::new())).build().unwrap();
//!
//! info!(log, "server started");
//! info!(log, "user $id logged in", &["auth"], LogFields::new().with_field("id", 42));
//! warning!(log, "low disk space", &["disk", "ops"]);
//! ```

/// Capture the expansion site as a [`CallerLocation`](crate::CallerLocation).
///
/// Records the enclosing module path, the enclosing function name, and
/// the source line and file.
#[macro_export]
macro_rules! caller_location {
    () => {{
        fn __loc() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let __path = __name_of(__loc);
        let __path = __path.strip_suffix("::__loc").unwrap_or(__path);
        let __method = __path.rsplit("::").next().unwrap_or(__path);
        $crate::CallerLocation::new(module_path!(), __method, line!(), file!())
    }};
}

/// Log a message at an explicit level, capturing the call site.
///
/// # Examples
///
/// ```
/// # use logshaper::prelude::*;
/// # use std::sync::Arc;
/// # let log = Shaper::builder(Arc::new(ConsoleBackend::new())).build().unwrap();
/// use logshaper::log;
/// log!(log, LogLevel::Info, "simple message");
/// log!(log, LogLevel::Error, "code $code", &[], LogFields::new().with_field("code", 500));
/// ```
#[macro_export]
macro_rules! log {
    ($shaper:expr, $level:expr, $template:expr) => {
        $crate::log!($shaper, $level, $template, &[], $crate::LogFields::new())
    };
    ($shaper:expr, $level:expr, $template:expr, $tags:expr) => {
        $crate::log!($shaper, $level, $template, $tags, $crate::LogFields::new())
    };
    ($shaper:expr, $level:expr, $template:expr, $tags:expr, $fields:expr) => {
        $shaper.log_located(
            $level,
            $template,
            $tags,
            $fields,
            Some($crate::caller_location!()),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($shaper:expr, $($arg:tt)+) => {
        $crate::log!($shaper, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($shaper:expr, $($arg:tt)+) => {
        $crate::log!($shaper, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($shaper:expr, $($arg:tt)+) => {
        $crate::log!($shaper, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($shaper:expr, $($arg:tt)+) => {
        $crate::log!($shaper, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($shaper:expr, $($arg:tt)+) => {
        $crate::log!($shaper, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($shaper:expr, $($arg:tt)+) => {
        $crate::log!($shaper, $crate::LogLevel::Critical, $($arg)+)
    };
}
