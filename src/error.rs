//! Error types for the proxy.

use thiserror::Error;

/// Status returned for every failure that is not an upstream rejection.
pub const INTERNAL_ERROR_STATUS: u16 = 500;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProxyError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The validation service answered with a non-success status.
    #[error("Upstream rejected request with status {status}: {message}")]
    UpstreamRejected { status: u16, message: String },

    #[error("Upstream error: {message}")]
    Upstream { message: String },

    #[error("Translation error: {message}")]
    Translation { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ProxyError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn upstream_rejected(status: u16, msg: impl Into<String>) -> Self {
        Self::UpstreamRejected {
            status,
            message: msg.into(),
        }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream {
            message: msg.into(),
        }
    }

    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation {
            message: msg.into(),
        }
    }

    /// HTTP status reported to the caller. Upstream rejections keep the
    /// upstream status, everything else is an internal failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UpstreamRejected { status, .. } => *status,
            _ => INTERNAL_ERROR_STATUS,
        }
    }

    /// Caller-facing detail string.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::UpstreamRejected { message, .. } => message.clone(),
            other => format!("Internal server error: {other}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
