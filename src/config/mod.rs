//! Configuration types for the MercadoLibre API SDK.
//!
//! # Overview
//!
//! - [`MeliConfig`]: application credentials and API endpoint
//! - [`MeliConfigBuilder`]: builder for [`MeliConfig`]
//! - [`ClientId`], [`ClientSecret`], [`ApiUrl`]: validated newtypes
//! - [`AuthRegion`]: per-site authorization endpoints
//!
//! # Example
//!
//! ```rust
//! use mercadolibre_api::{MeliConfig, ClientId, ClientSecret};
//!
//! let config = MeliConfig::builder()
//!     .client_id(ClientId::new(123_456))
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "https://api.mercadolibre.com");
//! ```

mod newtypes;
mod region;

pub use newtypes::{ApiUrl, ClientId, ClientSecret};
pub use region::AuthRegion;

use crate::clients::SDK_VERSION;
use crate::error::ConfigError;

/// Configuration for a MercadoLibre application.
///
/// Holds the application credentials and the REST endpoint. The credentials
/// never change once built; use [`MeliConfig::with_api_url`] to point an
/// existing configuration at a test double.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::{MeliConfig, ClientId, ClientSecret, ApiUrl};
///
/// let config = MeliConfig::builder()
///     .client_id(ClientId::new(1))
///     .client_secret(ClientSecret::new("secret").unwrap())
///     .api_url(ApiUrl::new("http://localhost:3000").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_url().as_ref(), "http://localhost:3000");
/// ```
#[derive(Clone, Debug)]
pub struct MeliConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    api_url: ApiUrl,
    user_agent_prefix: Option<String>,
}

impl MeliConfig {
    /// Creates a new builder for constructing a `MeliConfig`.
    #[must_use]
    pub fn builder() -> MeliConfigBuilder {
        MeliConfigBuilder::new()
    }

    /// Returns the application id.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the application secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the REST API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the `User-Agent` header value sent with every request.
    ///
    /// ```rust
    /// use mercadolibre_api::{MeliConfig, ClientId, ClientSecret};
    ///
    /// let config = MeliConfig::builder()
    ///     .client_id(ClientId::new(1))
    ///     .client_secret(ClientSecret::new("secret").unwrap())
    ///     .user_agent_prefix("MyApp/1.0")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(config.user_agent().starts_with("MyApp/1.0 | MELI-RUST-SDK/"));
    /// ```
    #[must_use]
    pub fn user_agent(&self) -> String {
        let prefix = self
            .user_agent_prefix
            .as_deref()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        format!("{prefix}MELI-RUST-SDK/{SDK_VERSION}")
    }

    /// Returns a copy of this configuration pointed at another API URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: ApiUrl) -> Self {
        self.api_url = api_url;
        self
    }
}

// Verify MeliConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MeliConfig>();
};

/// Builder for constructing [`MeliConfig`] instances.
///
/// `client_id` and `client_secret` are required.
///
/// # Defaults
///
/// - `api_url`: `https://api.mercadolibre.com`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct MeliConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    api_url: Option<ApiUrl>,
    user_agent_prefix: Option<String>,
}

impl MeliConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application id (required).
    #[must_use]
    pub const fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the application secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Overrides the REST API base URL.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets a prefix for the `User-Agent` header of requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`MeliConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id` or
    /// `client_secret` are not set.
    pub fn build(self) -> Result<MeliConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;

        Ok(MeliConfig {
            client_id,
            client_secret,
            api_url: self.api_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
