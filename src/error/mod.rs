//! Error types for the Taskline client.

use thiserror::Error;

/// Primary error type for all Taskline operations.
///
/// The first 401 on a request never surfaces here: it is absorbed by the
/// token-refresh path. What the caller sees is either the request's own
/// failure (`Transport`, `Http`, `Decode`) or one of the terminal
/// authentication kinds, all of which have already cleared stored
/// credentials and fired the logout signal by the time they are returned.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network-level failure, including the client-wide timeout. Never
    /// retried.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-401 error status from the API. Never retried.
    #[error("API error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Response or credential-file body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Credential-file hydration failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A 401 demanded recovery but no refresh token was stored.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// The stored refresh token carries an expiry claim in the past; the
    /// refresh endpoint was not called.
    #[error("Refresh token expired")]
    RefreshTokenExpired,

    /// The refresh endpoint answered 401: the refresh token is invalid
    /// server-side.
    #[error("Refresh token rejected by server")]
    RefreshTokenRejected,

    /// The refresh call failed for any reason other than rejection.
    #[error("Token refresh failed: {message}")]
    RefreshFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The retried request was itself answered with 401.
    #[error("Request unauthorized after token refresh")]
    RetryExhausted,
}

impl Error {
    pub(crate) fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn refresh_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::RefreshFailed {
            message: message.into(),
            source,
        }
    }

    /// Whether this error ended the session. Terminal kinds have cleared
    /// the credential store and fired the logout signal; the caller should
    /// route the user back to sign-in rather than retry.
    pub fn is_auth_terminal(&self) -> bool {
        matches!(
            self,
            Self::NoRefreshToken
                | Self::RefreshTokenExpired
                | Self::RefreshTokenRejected
                | Self::RefreshFailed { .. }
                | Self::RetryExhausted
        )
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;
