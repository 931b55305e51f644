//! HTTP client types for MercadoLibre API communication.
//!
//! # Overview
//!
//! - [`HttpTransport`]: the shared, explicitly built connection pool
//! - [`MeliClient`]: per-application client with OAuth and REST wrappers
//! - [`RequestParams`]: ordered query parameters, duplicates allowed
//! - [`HttpResponse`]: raw status, headers and body of a reply
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`MeliError`]: transport-level failures
//!
//! # Example
//!
//! ```rust,ignore
//! use mercadolibre_api::{HttpTransport, MeliClient, RequestParams};
//!
//! let transport = HttpTransport::new()?;
//! let client = MeliClient::new(config, transport.clone());
//!
//! let response = client.get("/sites/MLA").await?;
//! assert_eq!(response.code, 200);
//! ```
//!
//! # Status Codes
//!
//! The wrappers never turn HTTP statuses into errors and never retry: a 403
//! or 500 reply is an `Ok` [`HttpResponse`]. Only a failure to obtain any
//! reply yields [`MeliError::Network`].

mod errors;
mod http_request;
mod http_response;
mod meli_client;
mod transport;

pub use errors::MeliError;
pub use http_request::{HttpMethod, RequestParams};
pub use http_response::HttpResponse;
pub use meli_client::MeliClient;
pub use transport::{HttpTransport, HttpTransportBuilder, DEFAULT_MAX_CONNECTIONS, SDK_VERSION};
