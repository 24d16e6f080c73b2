//! Error types for the adapter

pub type Result<T> = std::result::Result<T, ShaperError>;

/// Configuration-time errors.
///
/// These are surfaced synchronously to the caller that misconfigured the
/// adapter or renderer. Failures on the hot logging path never use this
/// type: record assembly degrades to a fallback ERROR record instead of
/// returning an error.
#[derive(Debug, thiserror::Error)]
pub enum ShaperError {
    /// Level name did not match any known severity
    #[error("Logging level \"{0}\" is invalid")]
    UnknownLevel(String),

    /// Color name did not match any of the eight named colors
    #[error("Color \"{0}\" is invalid")]
    InvalidColor(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl ShaperError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        ShaperError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
