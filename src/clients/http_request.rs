//! Request-side types: HTTP methods and query parameters.

use std::fmt;

/// HTTP methods supported by the MercadoLibre API wrappers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that send a JSON body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// An ordered list of request parameters.
///
/// Used both for query strings and for the form-encoded token request.
/// Order is preserved and the same key may appear more than once, so this
/// is deliberately a sequence and not a map.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::RequestParams;
///
/// let params = RequestParams::new()
///     .with_access_token("APP_USR-123")
///     .param("attributes", "id")
///     .param("attributes", "title");
///
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.get_all("attributes").collect::<Vec<_>>(), ["id", "title"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParams(Vec<(String, String)>);

impl RequestParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a parameter, returning the list for chaining.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an `access_token` parameter.
    ///
    /// The SDK never attaches tokens on its own; this is the usual way to
    /// authenticate a call.
    #[must_use]
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.param("access_token", token)
    }

    /// Appends a parameter in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the parameters as key/value pairs.
    #[must_use]
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RequestParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_only_post_and_put_carry_bodies() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }

    #[test]
    fn test_params_preserve_order_and_duplicates() {
        let params = RequestParams::new()
            .param("ids", "MLA1")
            .param("limit", "10")
            .param("ids", "MLA2");

        assert_eq!(
            params.as_slice(),
            &[
                ("ids".to_string(), "MLA1".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("ids".to_string(), "MLA2".to_string()),
            ]
        );
        assert_eq!(params.get("ids"), Some("MLA1"));
        assert_eq!(params.get_all("ids").count(), 2);
    }

    #[test]
    fn test_with_access_token_adds_param() {
        let params = RequestParams::new().with_access_token("valid token");
        assert_eq!(params.get("access_token"), Some("valid token"));
    }

    #[test]
    fn test_collect_and_extend() {
        let mut params: RequestParams = vec![("a", "1")].into_iter().collect();
        params.extend([("b", "2")]);
        params.push("c", "3");

        assert_eq!(params.len(), 3);
        assert!(!params.is_empty());
        assert_eq!(params.get("b"), Some("2"));
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn test_get_result_outlives_lookup_key() {
        let params = RequestParams::new().param("site_id", "MLA");
        let value = {
            let key = String::from("site_id");
            params.get(&key)
        };
        assert_eq!(value, Some("MLA"));
    }

    #[test]
    fn test_new_params_are_empty() {
        assert!(RequestParams::new().is_empty());
        assert_eq!(RequestParams::default().len(), 0);
    }
}
