//! Authentication types for the MercadoLibre API SDK.
//!
//! - [`TokenState`]: the tokens and metadata obtained from the token endpoint
//! - [`oauth`]: authorization URL generation and the token grants

pub mod oauth;
pub mod token;

pub use token::TokenState;
