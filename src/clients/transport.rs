//! Shared HTTP transport.
//!
//! [`HttpTransport`] owns the connection pool used by every
//! [`MeliClient`](crate::MeliClient) it is handed to. It is built
//! explicitly, cloned into each client, and released when the last handle
//! is closed or dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::clients::errors::MeliError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default cap on connections open at once.
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

/// HTTP transport shared by MercadoLibre clients.
///
/// Cloning is cheap: clones share the same connection pool and the same
/// cap on connections in use. A request waits for a free slot before it is
/// sent and holds it until its body has been read.
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync`; one instance can serve clients on many
/// tasks at once.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use mercadolibre_api::HttpTransport;
///
/// let transport = HttpTransport::builder()
///     .max_connections(4)
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(transport.max_connections(), 4);
/// transport.close();
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
    max_connections: usize,
    timeout: Option<Duration>,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::TransportBuild`] if the underlying client cannot
    /// be created (e.g. TLS initialization failure).
    pub fn new() -> Result<Self, MeliError> {
        Self::builder().build()
    }

    /// Creates a builder for a customized transport.
    #[must_use]
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Returns the maximum number of connections in use at once.
    #[must_use]
    pub const fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Returns how many more requests could start right now.
    #[must_use]
    pub fn available_connections(&self) -> usize {
        self.permits.available_permits()
    }

    /// Returns the per-request timeout, if one is configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Releases this handle on the connection pool.
    ///
    /// The pool itself is torn down once every clone has been closed or
    /// dropped; requests already in flight on other clones are unaffected.
    pub fn close(self) {
        tracing::debug!("Closing MercadoLibre HTTP transport handle");
        drop(self);
    }

    pub(crate) fn request(&self, method: HttpMethod, url: &str) -> reqwest::RequestBuilder {
        match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        }
    }

    /// Sends a prepared request and reads the whole body.
    pub(crate) async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, reqwest::Error> {
        // The semaphore is never closed, so acquiring only waits.
        let _permit = self.permits.acquire().await.ok();
        let res = request.send().await?;
        let code = res.status().as_u16();
        let headers = HttpResponse::collect_headers(res.headers());
        let body = res.text().await?;
        Ok(HttpResponse::new(code, headers, body))
    }
}

/// Builder for [`HttpTransport`].
///
/// # Defaults
///
/// - `max_connections`: [`DEFAULT_MAX_CONNECTIONS`]
/// - `timeout`: none
/// - `connect_timeout`: none
#[derive(Debug)]
pub struct HttpTransportBuilder {
    max_connections: usize,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl HttpTransportBuilder {
    /// Sets the maximum number of connections in use at once.
    ///
    /// Requests beyond the limit wait for an earlier one to finish.
    #[must_use]
    pub const fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets a total timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a timeout for establishing connections.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::TransportBuild`] if `max_connections` is zero or
    /// too large, or if the underlying client cannot be created.
    pub fn build(self) -> Result<HttpTransport, MeliError> {
        if self.max_connections == 0 || self.max_connections > Semaphore::MAX_PERMITS {
            return Err(MeliError::TransportBuild {
                reason: format!(
                    "max_connections must be between 1 and {}, got {}",
                    Semaphore::MAX_PERMITS,
                    self.max_connections
                ),
            });
        }

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .pool_max_idle_per_host(self.max_connections);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build().map_err(|e| MeliError::TransportBuild {
            reason: e.to_string(),
        })?;

        tracing::debug!(
            max_connections = self.max_connections,
            "Created MercadoLibre HTTP transport"
        );

        Ok(HttpTransport {
            client,
            permits: Arc::new(Semaphore::new(self.max_connections)),
            max_connections: self.max_connections,
            timeout: self.timeout,
        })
    }
}
