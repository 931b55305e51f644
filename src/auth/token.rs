//! OAuth token state held by a client.
//!
//! This module provides [`TokenState`], the credentials obtained from the
//! token endpoint, and the wire type used to decode that endpoint's reply.

use chrono::{DateTime, Duration, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tokens and metadata obtained from a MercadoLibre token exchange.
///
/// Every field is optional: a client built from bare credentials has no
/// tokens until it authorizes, and the provider may omit any field other
/// than the access token. A successful exchange replaces the whole state at
/// once; fields are never updated piecemeal.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::TokenState;
///
/// let tokens = TokenState::new()
///     .with_access_token("APP_USR-abc")
///     .with_refresh_token("TG-def");
///
/// assert_eq!(tokens.access_token.as_deref(), Some("APP_USR-abc"));
/// assert!(tokens.has_refresh_token());
/// assert!(!tokens.is_expired());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    /// Credential attached to API calls on behalf of the user.
    pub access_token: Option<String>,

    /// Long-lived credential used to obtain a new access token.
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds, as reported by the provider.
    pub expires_in: Option<u64>,

    /// Space-separated scopes granted to the application.
    pub scope: Option<String>,

    /// Id of the user who authorized the application.
    pub user_id: Option<String>,

    /// Token type, normally `bearer`.
    pub token_type: Option<String>,

    /// When the tokens were received from the provider.
    pub obtained_at: Option<DateTime<Utc>>,
}

impl TokenState {
    /// Creates an empty token state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a previously obtained access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets a previously obtained refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Returns `true` if a non-empty refresh token is stored.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns when the access token expires.
    ///
    /// `None` unless both the receive time and `expires_in` are known.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let obtained_at = self.obtained_at?;
        let seconds = i64::try_from(self.expires_in?)
            .ok()
            .filter(|s| *s <= i64::MAX / 1_000)?;
        obtained_at.checked_add_signed(Duration::seconds(seconds))
    }

    /// Returns `true` if the access token is known to have expired.
    ///
    /// Tokens without expiry information are never considered expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|expires| Utc::now() >= expires)
    }

    pub(crate) fn from_response(response: TokenResponse, obtained_at: DateTime<Utc>) -> Self {
        Self {
            access_token: Some(response.access_token),
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            scope: response.scope,
            user_id: response.user_id,
            token_type: response.token_type,
            obtained_at: Some(obtained_at),
        }
    }
}

// Verify TokenState is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenState>();
};

/// Successful reply of `POST /oauth/token`.
///
/// The provider sends `expires_in` and `user_id` as numbers, but older
/// deployments send them as strings; both are accepted.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub expires_in: Option<u64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub scope: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub token_type: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a non-negative integer, found {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a numeric string, found '{s}'"))),
        Some(other) => Err(de::Error::custom(format!(
            "expected an integer, found {other}"
        ))),
    }
}
