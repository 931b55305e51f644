//! Authorization URL generation.
//!
//! [`auth_url`] builds the address the user is redirected to so they can
//! grant the application access. The code MercadoLibre sends back to the
//! callback is then exchanged through
//! [`MeliClient::authorize`](crate::MeliClient::authorize).

use crate::config::{AuthRegion, MeliConfig};

/// Builds the authorization URL for the authorization-code grant.
///
/// The result has the form
/// `{region}/authorization?response_type=code&client_id={id}&redirect_uri={callback}`
/// with `callback_url` percent-encoded. Encoding cannot fail for any `&str`,
/// so the callback is always emitted encoded.
///
/// Encoding follows RFC 3986 rather than HTML form rules: a space becomes
/// `%20` (never `+`) and only `-`, `.`, `_` and `~` are left unescaped among
/// punctuation, so `*` becomes `%2A`. Register callbacks without such
/// characters if the exact redirect string matters.
///
/// # Arguments
///
/// * `config` - Application configuration providing the client id
/// * `callback_url` - The application's registered redirect URI
/// * `region` - Site whose authorization host the user is sent to
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::{MeliConfig, ClientId, ClientSecret, AuthRegion};
/// use mercadolibre_api::auth::oauth::auth_url;
///
/// let config = MeliConfig::builder()
///     .client_id(ClientId::new(123_456))
///     .client_secret(ClientSecret::new("client secret").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     auth_url(&config, "http://someurl.com", AuthRegion::MLA),
///     "https://auth.mercadolibre.com.ar/authorization?response_type=code&client_id=123456&redirect_uri=http%3A%2F%2Fsomeurl.com"
/// );
/// ```
#[must_use]
pub fn auth_url(config: &MeliConfig, callback_url: &str, region: AuthRegion) -> String {
    format!(
        "{}/authorization?response_type=code&client_id={}&redirect_uri={}",
        region.auth_base_url(),
        config.client_id(),
        urlencoding::encode(callback_url)
    )
}
