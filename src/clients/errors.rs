//! Error types for API calls.
//!
//! A non-2xx status is **not** an error: the response is returned for the
//! caller to inspect. [`MeliError`] only covers failures where no response
//! could be obtained at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use mercadolibre_api::MeliError;
//!
//! match client.get("/sites").await {
//!     Ok(response) if response.is_ok() => println!("{}", response.body),
//!     Ok(response) => println!("API answered {}", response.code),
//!     Err(MeliError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

/// Errors raised by the HTTP verb wrappers and the transport.
#[derive(Debug, Error)]
pub enum MeliError {
    /// Connection failure, timeout, or I/O error while sending the request or
    /// reading the response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The HTTP transport could not be created.
    #[error("Failed to build HTTP transport: {reason}")]
    TransportBuild {
        /// Why the underlying client could not be built.
        reason: String,
    },
}

// Verify MeliError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MeliError>();
};
