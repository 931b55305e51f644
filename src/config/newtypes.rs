//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction, so a built
//! [`MeliConfig`](crate::MeliConfig) always carries usable credentials.

use crate::error::ConfigError;
use std::fmt;

/// A MercadoLibre application id.
///
/// Application ids are numeric; the wrapper keeps them from being mixed up
/// with user ids or other integers passed around the SDK.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::ClientId;
///
/// let id = ClientId::new(123_456);
/// assert_eq!(id.get(), 123_456);
/// assert_eq!(id.to_string(), "123456");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClientId(u64);

impl ClientId {
    /// Wraps a numeric application id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ClientId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated MercadoLibre application secret.
///
/// The `Debug` implementation masks the value, displaying only
/// `ClientSecret(*****)`, so secrets do not leak into logs.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated base URL for the MercadoLibre REST API.
///
/// Trailing slashes are stripped so request paths (which start with `/`)
/// can be appended directly.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::ApiUrl;
///
/// let url = ApiUrl::new("http://localhost:3000/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:3000");
/// assert_eq!(url.join("/sites"), "http://localhost:3000/sites");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(String);

impl ApiUrl {
    /// The production API endpoint.
    pub const PRODUCTION: &'static str = "https://api.mercadolibre.com";

    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] unless the URL uses the `http`
    /// or `https` scheme and names a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidApiUrl { url: url.clone() })?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.starts_with(':') {
            return Err(ConfigError::InvalidApiUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the production API URL.
    #[must_use]
    pub fn production() -> Self {
        Self(Self::PRODUCTION.to_string())
    }

    /// Appends a request path to the base URL.
    ///
    /// A missing leading slash on `path` is added.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self::production()
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
