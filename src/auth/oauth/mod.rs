//! OAuth 2.0 flows for MercadoLibre applications.
//!
//! # Authorization Code Grant
//!
//! 1. **Redirect** ([`auth_url`]): send the user to the authorization page of
//!    the site the application operates on.
//! 2. **Exchange** ([`exchange_authorization_code`]): trade the code appended
//!    to the callback URL for an access token and, with the `offline_access`
//!    scope, a refresh token.
//!
//! # Refresh Token Grant
//!
//! Access tokens are short-lived. [`refresh_access_token`] trades the stored
//! refresh token for a new set of tokens.
//!
//! [`MeliClient`](crate::MeliClient) wraps the exchanges and keeps the
//! resulting [`TokenState`](crate::TokenState); the free functions are
//! available for callers that manage tokens themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! use mercadolibre_api::{AuthRegion, HttpTransport, MeliClient, MeliConfig};
//!
//! let mut client = MeliClient::new(config, HttpTransport::new()?);
//!
//! // Step 1: redirect the user
//! let url = client.auth_url("https://myapp.example.com/callback", AuthRegion::MLA);
//!
//! // Step 2: exchange the code received on the callback
//! client.authorize(&code, "https://myapp.example.com/callback").await?;
//!
//! // Later, when the access token expires
//! client.refresh_access_token().await?;
//! ```

mod auth_url;
mod error;
mod token_exchange;

pub use auth_url::auth_url;
pub use error::AuthorizationFailure;
pub use token_exchange::{exchange_authorization_code, refresh_access_token, TOKEN_PATH};
