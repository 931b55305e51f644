//! Authorization-code and refresh-token grants.
//!
//! Both grants post a form-encoded body to `{api_url}/oauth/token` and decode
//! the JSON reply into a fresh [`TokenState`].
//!
//! # Failure Semantics
//!
//! Both functions return every failure to the caller. A refresh that
//! fails leaves the caller's existing tokens untouched, since the new state is
//! only produced on success.

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

use crate::auth::oauth::AuthorizationFailure;
use crate::auth::token::{TokenResponse, TokenState};
use crate::clients::{HttpMethod, HttpTransport, RequestParams};
use crate::config::MeliConfig;

/// Path of the token endpoint, relative to the API URL.
pub const TOKEN_PATH: &str = "/oauth/token";

const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Exchanges an authorization code for tokens.
///
/// # Arguments
///
/// * `transport` - Transport used to reach the token endpoint
/// * `config` - Application credentials and API URL
/// * `code` - The code MercadoLibre appended to the callback URL
/// * `redirect_uri` - The same redirect URI used to obtain the code
///
/// # Errors
///
/// - [`AuthorizationFailure::Transport`] if the request could not be completed
/// - [`AuthorizationFailure::Rejected`] for any non-200 reply
/// - [`AuthorizationFailure::MalformedResponse`] if the reply is not JSON or
///   lacks an access token
pub async fn exchange_authorization_code(
    transport: &HttpTransport,
    config: &MeliConfig,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenState, AuthorizationFailure> {
    let params = grant_params(config, AUTHORIZATION_CODE_GRANT_TYPE)
        .param("code", code)
        .param("redirect_uri", redirect_uri);

    request_token(transport, config, AUTHORIZATION_CODE_GRANT_TYPE, &params).await
}

/// Exchanges a refresh token for a new set of tokens.
///
/// # Errors
///
/// Returns [`AuthorizationFailure::MissingRefreshToken`] without sending
/// anything if `refresh_token` is empty; otherwise the same errors as
/// [`exchange_authorization_code`].
pub async fn refresh_access_token(
    transport: &HttpTransport,
    config: &MeliConfig,
    refresh_token: &str,
) -> Result<TokenState, AuthorizationFailure> {
    if refresh_token.is_empty() {
        return Err(AuthorizationFailure::MissingRefreshToken);
    }

    let params =
        grant_params(config, REFRESH_TOKEN_GRANT_TYPE).param("refresh_token", refresh_token);

    request_token(transport, config, REFRESH_TOKEN_GRANT_TYPE, &params).await
}

fn grant_params(config: &MeliConfig, grant_type: &str) -> RequestParams {
    RequestParams::new()
        .param("grant_type", grant_type)
        .param("client_id", config.client_id().to_string())
        .param("client_secret", config.client_secret().as_ref())
}

async fn request_token(
    transport: &HttpTransport,
    config: &MeliConfig,
    grant_type: &str,
    params: &RequestParams,
) -> Result<TokenState, AuthorizationFailure> {
    let url = config.api_url().join(TOKEN_PATH);
    tracing::debug!(grant_type, "Requesting MercadoLibre access token");

    let request = transport
        .request(HttpMethod::Post, &url)
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, config.user_agent())
        .form(params.as_slice());

    let response = transport.execute(request).await.map_err(|e| {
        tracing::warn!(grant_type, error = %e, "Token request failed");
        AuthorizationFailure::Transport(e)
    })?;

    match parse_token_response(response.code, &response.body, Utc::now()) {
        Ok(tokens) => {
            tracing::debug!(grant_type, user_id = ?tokens.user_id, "Obtained MercadoLibre access token");
            Ok(tokens)
        }
        Err(e) => {
            tracing::warn!(grant_type, status = response.code, "Token exchange failed: {}", e);
            Err(e)
        }
    }
}

/// Decodes a token endpoint reply.
///
/// The body is parsed as JSON before the status is inspected, so a non-JSON
/// body is reported raw whatever the status.
pub(crate) fn parse_token_response(
    status: u16,
    body: &str,
    obtained_at: DateTime<Utc>,
) -> Result<TokenState, AuthorizationFailure> {
    let malformed = || AuthorizationFailure::MalformedResponse {
        status,
        body: body.to_string(),
    };

    let value: Value = serde_json::from_str(body).map_err(|_| malformed())?;

    if status != 200 {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| body.to_string(), str::to_string);
        return Err(AuthorizationFailure::Rejected { status, message });
    }

    let response: TokenResponse = serde_json::from_value(value).map_err(|_| malformed())?;
    Ok(TokenState::from_response(response, obtained_at))
}
