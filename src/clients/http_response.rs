//! HTTP response type returned by the API wrappers.

use std::collections::HashMap;

/// A raw HTTP response from the MercadoLibre API.
///
/// The body is kept exactly as received; interpreting it is up to the
/// caller. Header names are stored lowercase and may carry several values.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::HttpResponse;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(403, HashMap::new(), r#"{"message":"forbidden"}"#.to_string());
/// assert!(!response.is_ok());
/// assert_eq!(response.json().unwrap()["message"], "forbidden");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Parses the body as untyped JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    pub(crate) fn collect_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
