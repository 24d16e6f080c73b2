//! Backend seam for level enablement and output
//!
//! The adapter only shapes records. Level filtering, handler dispatch
//! and stream writing belong to the backend behind this trait.

use crate::core::log_level::LogLevel;

pub trait Backend: Send + Sync {
    /// Whether records at `level` should be assembled at all.
    ///
    /// Checked before any assembly work, so disabled levels cost nothing
    /// and dynamic providers are not invoked for them.
    fn is_enabled(&self, level: LogLevel) -> bool;

    /// Accept one pre-rendered record line for output at `level`.
    fn write(&self, level: LogLevel, record: &str);
}
