use thiserror::Error;

/// A version token that does not follow the release grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{0}' has no leading numeric component")]
    NotAVersion(String),

    #[error("'{token}' is not a valid version: {reason}")]
    Malformed { token: String, reason: String },
}

/// Raised by selection when filtering left nothing to choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no qualifying versions")]
pub struct NotFoundError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package '{package}' not found. HTTP Status: {status}")]
    PackageNotFound { package: String, status: u16 },

    #[error("Package '{package}' version '{version}' not found. HTTP Status: {status}")]
    ReleaseNotFound {
        package: String,
        version: String,
        status: u16,
    },

    #[error("Error decoding JSON for package '{package}': {message}")]
    Decode { package: String, message: String },
}
