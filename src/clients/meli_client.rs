//! MercadoLibre API client.
//!
//! This module provides [`MeliClient`], which pairs an application's
//! configuration and token state with a shared [`HttpTransport`].

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

use crate::auth::oauth::{self, AuthorizationFailure};
use crate::auth::TokenState;
use crate::clients::{HttpMethod, HttpResponse, HttpTransport, MeliError, RequestParams};
use crate::config::{ApiUrl, AuthRegion, MeliConfig};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the MercadoLibre REST API.
///
/// Provides `get`, `post`, `put` and `delete` wrappers that return the raw
/// [`HttpResponse`], plus the OAuth exchanges that fill the client's
/// [`TokenState`].
///
/// Tokens are **never** attached to API calls automatically: add them with
/// [`RequestParams::with_access_token`]. Non-2xx statuses are returned as
/// ordinary responses.
///
/// # Ownership
///
/// Each client owns its token state; the OAuth methods take `&mut self`.
/// Several clients may share one transport (and its connection pool) by
/// cloning it.
///
/// # Example
///
/// ```rust,ignore
/// use mercadolibre_api::{ClientId, ClientSecret, HttpTransport, MeliClient, MeliConfig, RequestParams};
///
/// let config = MeliConfig::builder()
///     .client_id(ClientId::new(123_456))
///     .client_secret(ClientSecret::new("client secret")?)
///     .build()?;
///
/// let mut client = MeliClient::new(config, HttpTransport::new()?);
/// client.authorize(&code, "https://myapp.example.com/callback").await?;
///
/// let params = RequestParams::new().with_access_token(client.access_token().unwrap_or_default());
/// let response = client.get_with_params("/users/me", &params).await?;
/// println!("{} {}", response.code, response.body);
/// ```
#[derive(Debug)]
pub struct MeliClient {
    config: MeliConfig,
    transport: HttpTransport,
    tokens: TokenState,
    user_agent: String,
}

// Verify MeliClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MeliClient>();
};

impl MeliClient {
    /// Creates a client without tokens.
    #[must_use]
    pub fn new(config: MeliConfig, transport: HttpTransport) -> Self {
        Self::with_tokens(config, transport, TokenState::new())
    }

    /// Creates a client holding previously obtained tokens.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mercadolibre_api::{ClientId, ClientSecret, HttpTransport, MeliClient, MeliConfig, TokenState};
    ///
    /// let config = MeliConfig::builder()
    ///     .client_id(ClientId::new(123_456))
    ///     .client_secret(ClientSecret::new("client secret").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = MeliClient::with_tokens(
    ///     config,
    ///     HttpTransport::new().unwrap(),
    ///     TokenState::new().with_access_token("valid token"),
    /// );
    /// assert_eq!(client.access_token(), Some("valid token"));
    /// ```
    #[must_use]
    pub fn with_tokens(config: MeliConfig, transport: HttpTransport, tokens: TokenState) -> Self {
        let user_agent = config.user_agent();
        Self {
            config,
            transport,
            tokens,
            user_agent,
        }
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &MeliConfig {
        &self.config
    }

    /// Returns the transport this client sends requests through.
    #[must_use]
    pub const fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Returns the current token state.
    #[must_use]
    pub const fn tokens(&self) -> &TokenState {
        &self.tokens
    }

    /// Returns the current access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.access_token.as_deref()
    }

    /// Returns the current refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.refresh_token.as_deref()
    }

    /// Returns the access token lifetime in seconds, if known.
    #[must_use]
    pub const fn expires_in(&self) -> Option<u64> {
        self.tokens.expires_in
    }

    /// Returns the granted scopes, if known.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.tokens.scope.as_deref()
    }

    /// Returns the id of the authorizing user, if known.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.tokens.user_id.as_deref()
    }

    /// Returns the token type, if known.
    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.tokens.token_type.as_deref()
    }

    /// Points the client at another API URL.
    pub fn set_api_url(&mut self, api_url: ApiUrl) {
        self.config = self.config.clone().with_api_url(api_url);
    }

    /// Builds the URL to redirect the user to for authorization.
    ///
    /// See [`oauth::auth_url`].
    #[must_use]
    pub fn auth_url(&self, callback_url: &str, region: AuthRegion) -> String {
        oauth::auth_url(&self.config, callback_url, region)
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// On success the token state is replaced as a whole; on failure it is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationFailure`] on transport failure, a non-200
    /// reply, or a malformed reply.
    pub async fn authorize(
        &mut self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<(), AuthorizationFailure> {
        self.tokens =
            oauth::exchange_authorization_code(&self.transport, &self.config, code, redirect_uri)
                .await?;
        Ok(())
    }

    /// Exchanges the stored refresh token for new tokens.
    ///
    /// Failures are returned, never swallowed: callers that want to carry on
    /// with the old access token must decide so explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationFailure::MissingRefreshToken`] if no refresh
    /// token is stored, otherwise the same errors as [`Self::authorize`].
    pub async fn refresh_access_token(&mut self) -> Result<(), AuthorizationFailure> {
        if !self.tokens.has_refresh_token() {
            return Err(AuthorizationFailure::MissingRefreshToken);
        }
        let refresh_token = self.tokens.refresh_token.as_deref().unwrap_or_default();

        self.tokens =
            oauth::refresh_access_token(&self.transport, &self.config, refresh_token).await?;
        Ok(())
    }

    /// Sends a GET request without parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Network`] if no response could be obtained.
    pub async fn get(&self, path: &str) -> Result<HttpResponse, MeliError> {
        self.send(HttpMethod::Get, path, &RequestParams::new(), None)
            .await
    }

    /// Sends a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Network`] if no response could be obtained.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let params = RequestParams::new().with_access_token(token);
    /// let response = client.get_with_params("/users/me", &params).await?;
    /// if response.code == 403 {
    ///     // token was rejected; the call itself succeeded
    /// }
    /// ```
    pub async fn get_with_params(
        &self,
        path: &str,
        params: &RequestParams,
    ) -> Result<HttpResponse, MeliError> {
        self.send(HttpMethod::Get, path, params, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Network`] if no response could be obtained.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let params = RequestParams::new().with_access_token(token);
    /// let item = serde_json::json!({"title": "Item de test", "category_id": "MLA3530"});
    /// let response = client.post("/items", &params, &item).await?;
    /// ```
    pub async fn post(
        &self,
        path: &str,
        params: &RequestParams,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, MeliError> {
        self.send(HttpMethod::Post, path, params, Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Network`] if no response could be obtained.
    pub async fn put(
        &self,
        path: &str,
        params: &RequestParams,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, MeliError> {
        self.send(HttpMethod::Put, path, params, Some(body)).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Network`] if no response could be obtained.
    pub async fn delete(
        &self,
        path: &str,
        params: &RequestParams,
    ) -> Result<HttpResponse, MeliError> {
        self.send(HttpMethod::Delete, path, params, None).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        params: &RequestParams,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse, MeliError> {
        let url = self.config.api_url().join(path);
        tracing::debug!(%method, path, params = params.len(), "Sending MercadoLibre API request");

        let mut request = self
            .transport
            .request(method, &url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(USER_AGENT, &self.user_agent);

        if !params.is_empty() {
            request = request.query(params.as_slice());
        }

        if let (true, Some(body)) = (method.has_body(), body) {
            request = request
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_string());
        }

        let response = self.transport.execute(request).await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "MercadoLibre API request failed");
            MeliError::Network(e)
        })?;

        tracing::debug!(%method, path, status = response.code, "Received MercadoLibre API response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret};

    fn create_test_client() -> MeliClient {
        let config = MeliConfig::builder()
            .client_id(ClientId::new(123_456))
            .client_secret(ClientSecret::new("client secret").unwrap())
            .build()
            .unwrap();
        MeliClient::new(config, HttpTransport::new().unwrap())
    }

    #[test]
    fn test_new_client_has_no_tokens() {
        let client = create_test_client();

        assert!(client.access_token().is_none());
        assert!(client.refresh_token().is_none());
        assert!(client.expires_in().is_none());
        assert!(client.scope().is_none());
        assert!(client.user_id().is_none());
        assert!(client.token_type().is_none());
    }

    #[test]
    fn test_auth_url_delegates_to_config_client_id() {
        let client = create_test_client();
        assert_eq!(
            client.auth_url("http://someurl.com", AuthRegion::MLA),
            "https://auth.mercadolibre.com.ar/authorization?response_type=code&client_id=123456&redirect_uri=http%3A%2F%2Fsomeurl.com"
        );
    }

    #[test]
    fn test_set_api_url_overrides_endpoint_only() {
        let mut client = create_test_client();
        client.set_api_url(ApiUrl::new("http://localhost:3000").unwrap());

        assert_eq!(client.config().api_url().as_ref(), "http://localhost:3000");
        assert_eq!(client.config().client_id().get(), 123_456);
    }

    #[test]
    fn test_user_agent_is_sdk_identifier() {
        let client = create_test_client();
        assert!(client.user_agent.starts_with("MELI-RUST-SDK/"));
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_fails_fast() {
        let mut client = create_test_client();

        let result = client.refresh_access_token().await;

        assert!(matches!(
            result,
            Err(AuthorizationFailure::MissingRefreshToken)
        ));
        assert!(client.access_token().is_none());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeliClient>();
    }
}
