use thiserror::Error;

use crate::version::error::{ParseError, RegistryError};

/// Why a single request could not be resolved
///
/// None of these stop the run; each is reported next to the request it
/// belongs to.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid version for package '{package}': {source}")]
    InvalidVersion { package: String, source: ParseError },

    #[error("No versions found for package {package}.")]
    NoQualifyingVersions { package: String },

    #[error("Latest version not found for package '{package}'")]
    UpstreamMalformed { package: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ResolveError {
    /// Stable machine-readable name of the failure, used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::InvalidVersion { .. } => "invalid_version",
            ResolveError::NoQualifyingVersions { .. } => "no_qualifying_versions",
            ResolveError::UpstreamMalformed { .. } => "upstream_malformed",
            ResolveError::Registry(RegistryError::PackageNotFound { .. })
            | ResolveError::Registry(RegistryError::ReleaseNotFound { .. }) => "upstream_not_found",
            ResolveError::Registry(RegistryError::Decode { .. }) => "decode_error",
            ResolveError::Registry(RegistryError::Network(_)) => "network_error",
        }
    }
}
