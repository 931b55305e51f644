//! Error types for SDK configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! credentials or URLs are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use mercadolibre_api::{ClientSecret, ConfigError};
//!
//! let result = ClientSecret::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientSecret)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the secret key of your MercadoLibre application.")]
    EmptyClientSecret,

    /// API base URL is invalid.
    #[error("Invalid API URL '{url}'. Expected an absolute http(s) URL such as 'https://api.mercadolibre.com'.")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// An authorization region code was not recognized.
    #[error("Unknown authorization region '{code}'. Expected a site code such as 'MLA' or 'MLB'.")]
    UnknownRegion {
        /// The unrecognized site code.
        code: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_client_secret_error_message() {
        let message = ConfigError::EmptyClientSecret.to_string();
        assert!(message.contains("Client secret cannot be empty"));
    }

    #[test]
    fn test_invalid_api_url_includes_url() {
        let error = ConfigError::InvalidApiUrl {
            url: "ftp://nope".to_string(),
        };
        assert!(error.to_string().contains("ftp://nope"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "client_id" };
        let message = error.to_string();
        assert!(message.contains("client_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_unknown_region_includes_code() {
        let error = ConfigError::UnknownRegion {
            code: "XYZ".to_string(),
        };
        assert!(error.to_string().contains("XYZ"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyClientSecret;
        let _: &dyn std::error::Error = &error;
    }
}
