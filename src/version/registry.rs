//! Registry trait for fetching package metadata from a package index

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::PackageMetadata;

/// Trait for fetching package metadata from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches package-level metadata: the current version and every release key
    ///
    /// # Arguments
    /// * `package_name` - The name of the package (e.g., "pandas")
    async fn fetch_unqualified(&self, package_name: &str) -> Result<PackageMetadata, RegistryError>;

    /// Fetches metadata for one exact release, including its requirement strings
    ///
    /// # Arguments
    /// * `package_name` - The name of the package
    /// * `version` - The exact release key (e.g., "1.5.3")
    async fn fetch_qualified(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError>;
}
