//! # MercadoLibre API Rust SDK
//!
//! A Rust SDK for the MercadoLibre REST API, providing type-safe
//! configuration, the OAuth 2.0 authorization-code and refresh-token grants,
//! and thin HTTP wrappers that return raw responses.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`MeliConfig`] and [`MeliConfigBuilder`]
//! - Validated newtypes for application credentials and the API URL
//! - Per-site authorization URLs via [`AuthRegion`]
//! - Authorization-code and refresh-token exchanges via [`auth::oauth`]
//! - An explicitly built, shareable [`HttpTransport`]
//! - GET, POST, PUT and DELETE wrappers on [`MeliClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mercadolibre_api::{MeliConfig, ClientId, ClientSecret, HttpTransport, MeliClient};
//!
//! let config = MeliConfig::builder()
//!     .client_id(ClientId::new(123_456))
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let transport = HttpTransport::new().unwrap();
//! let client = MeliClient::new(config, transport);
//! assert!(client.access_token().is_none());
//! ```
//!
//! ## OAuth Authentication
//!
//! ```rust,ignore
//! use mercadolibre_api::{AuthRegion, MeliClient};
//!
//! // Step 1: send the user to the authorization page
//! let url = client.auth_url("https://your-app.com/callback", AuthRegion::MLA);
//!
//! // Step 2: exchange the code MercadoLibre appends to the callback
//! client.authorize(&code, "https://your-app.com/callback").await?;
//!
//! // Step 3: refresh when the access token expires
//! if client.tokens().is_expired() {
//!     client.refresh_access_token().await?;
//! }
//! ```
//!
//! ## Making API Calls
//!
//! Tokens are not attached automatically; pass them as a parameter:
//!
//! ```rust,ignore
//! use mercadolibre_api::RequestParams;
//!
//! let params = RequestParams::new().with_access_token(client.access_token().unwrap_or_default());
//!
//! let me = client.get_with_params("/users/me", &params).await?;
//! let item = client
//!     .post("/items", &params, &serde_json::json!({"title": "Item de test"}))
//!     .await?;
//!
//! // Non-2xx statuses are ordinary responses
//! if item.code != 201 {
//!     eprintln!("item not created: {}", item.body);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the transport is built explicitly and handed to
//!   each client
//! - **Fail-fast validation**: newtypes validate on construction
//! - **No silent failures**: token exchanges return every error
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::TokenState;
pub use config::{ApiUrl, AuthRegion, ClientId, ClientSecret, MeliConfig, MeliConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpMethod, HttpResponse, HttpTransport, HttpTransportBuilder, MeliClient, MeliError,
    RequestParams, DEFAULT_MAX_CONNECTIONS, SDK_VERSION,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{
    auth_url, exchange_authorization_code, refresh_access_token, AuthorizationFailure,
};
