//! Errors raised by the OAuth token exchange.
//!
//! # Example
//!
//! ```rust
//! use mercadolibre_api::auth::oauth::AuthorizationFailure;
//!
//! let error = AuthorizationFailure::Rejected {
//!     status: 400,
//!     message: "invalid_grant".to_string(),
//! };
//! assert_eq!(error.message(), "invalid_grant");
//! ```

use thiserror::Error;

/// Errors that can occur while exchanging a code or refresh token.
///
/// Both [`authorize`](crate::MeliClient::authorize) and
/// [`refresh_access_token`](crate::MeliClient::refresh_access_token) return
/// this type; neither swallows failures.
#[derive(Debug, Error)]
pub enum AuthorizationFailure {
    /// The token request could not be sent or its reply could not be read.
    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-200 status.
    ///
    /// `message` is the provider's `message` field, or the raw body when the
    /// reply carries none.
    #[error("Authorization rejected with status {status}: {message}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
        /// The provider's error message.
        message: String,
    },

    /// The reply was not valid JSON, or a 200 reply lacked a usable
    /// `access_token`.
    #[error("Unexpected token response (status {status}): {body}")]
    MalformedResponse {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// A refresh was requested but no refresh token is stored.
    #[error("No refresh token available. Authorize with the offline_access scope first.")]
    MissingRefreshToken,
}

impl AuthorizationFailure {
    /// Returns the provider message or raw body behind this failure.
    ///
    /// For transport failures and a missing refresh token this is the
    /// error's display text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::MalformedResponse { body, .. } => body.clone(),
            Self::Transport(_) | Self::MissingRefreshToken => self.to_string(),
        }
    }

    /// Returns the HTTP status of the provider's reply, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::MalformedResponse { status, .. } => {
                Some(*status)
            }
            Self::Transport(_) | Self::MissingRefreshToken => None,
        }
    }
}

// Verify AuthorizationFailure is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthorizationFailure>();
};
