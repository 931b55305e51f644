//! MercadoLibre authorization regions.
//!
//! This module provides the [`AuthRegion`] enum mapping each site code to the
//! host users are redirected to for the OAuth authorization step.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A MercadoLibre site with its own authorization endpoint.
///
/// Each marketplace country runs its own authorization host; the user must be
/// sent to the one matching the site the application operates on.
///
/// # Example
///
/// ```rust
/// use mercadolibre_api::AuthRegion;
///
/// let region: AuthRegion = "mlb".parse().unwrap();
/// assert_eq!(region, AuthRegion::MLB);
/// assert_eq!(region.auth_base_url(), "https://auth.mercadolivre.com.br");
/// assert_eq!(region.to_string(), "MLB");
/// ```
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthRegion {
    /// Argentina
    MLA,
    /// Brazil
    MLB,
    /// Colombia
    MCO,
    /// Costa Rica
    MCR,
    /// Ecuador
    MEC,
    /// Chile
    MLC,
    /// Mexico
    MLM,
    /// Uruguay
    MLU,
    /// Venezuela
    MLV,
    /// Panama
    MPA,
    /// Peru
    MPE,
    /// Portugal
    MPT,
    /// Dominican Republic
    MRD,
}

impl AuthRegion {
    const ALL: [Self; 13] = [
        Self::MLA,
        Self::MLB,
        Self::MCO,
        Self::MCR,
        Self::MEC,
        Self::MLC,
        Self::MLM,
        Self::MLU,
        Self::MLV,
        Self::MPA,
        Self::MPE,
        Self::MPT,
        Self::MRD,
    ];

    /// Returns every known region.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Returns the authorization base URL for this region, without a trailing slash.
    #[must_use]
    pub const fn auth_base_url(self) -> &'static str {
        match self {
            Self::MLA => "https://auth.mercadolibre.com.ar",
            Self::MLB => "https://auth.mercadolivre.com.br",
            Self::MCO => "https://auth.mercadolibre.com.co",
            Self::MCR => "https://auth.mercadolibre.com.cr",
            Self::MEC => "https://auth.mercadolibre.com.ec",
            Self::MLC => "https://auth.mercadolibre.cl",
            Self::MLM => "https://auth.mercadolibre.com.mx",
            Self::MLU => "https://auth.mercadolibre.com.uy",
            Self::MLV => "https://auth.mercadolibre.com.ve",
            Self::MPA => "https://auth.mercadolibre.com.pa",
            Self::MPE => "https://auth.mercadolibre.com.pe",
            Self::MPT => "https://auth.mercadolibre.com.pt",
            Self::MRD => "https://auth.mercadolibre.com.do",
        }
    }

    /// Returns the site code (e.g. `"MLA"`).
    #[must_use]
    pub const fn site_id(self) -> &'static str {
        match self {
            Self::MLA => "MLA",
            Self::MLB => "MLB",
            Self::MCO => "MCO",
            Self::MCR => "MCR",
            Self::MEC => "MEC",
            Self::MLC => "MLC",
            Self::MLM => "MLM",
            Self::MLU => "MLU",
            Self::MLV => "MLV",
            Self::MPA => "MPA",
            Self::MPE => "MPE",
            Self::MPT => "MPT",
            Self::MRD => "MRD",
        }
    }

    /// Returns the English name of the region's country.
    #[must_use]
    pub const fn country(self) -> &'static str {
        match self {
            Self::MLA => "Argentina",
            Self::MLB => "Brazil",
            Self::MCO => "Colombia",
            Self::MCR => "Costa Rica",
            Self::MEC => "Ecuador",
            Self::MLC => "Chile",
            Self::MLM => "Mexico",
            Self::MLU => "Uruguay",
            Self::MLV => "Venezuela",
            Self::MPA => "Panama",
            Self::MPE => "Peru",
            Self::MPT => "Portugal",
            Self::MRD => "Dominican Republic",
        }
    }
}

impl fmt::Display for AuthRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.site_id())
    }
}

impl FromStr for AuthRegion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|region| region.site_id() == code)
            .ok_or(ConfigError::UnknownRegion { code })
    }
}
