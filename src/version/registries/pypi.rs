//! PyPI registry client for the JSON API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::PackageMetadata;

pub const DEFAULT_PYPI_REGISTRY: &str = "https://pypi.org";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// PyPI registry client
pub struct PypiRegistry {
    client: Client,
    base_url: String,
}

impl Default for PypiRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PYPI_REGISTRY.to_string())
    }
}

impl PypiRegistry {
    pub fn new(base_url: String) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    fn with_client(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn decode(response: Response, package_name: &str) -> Result<PackageMetadata, RegistryError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| RegistryError::Decode {
            package: package_name.to_string(),
            message: e.to_string(),
        })
    }
}

/// Escape characters that would move a name or version out of its own path segment.
fn encode_path_segment(segment: &str) -> String {
    segment
        .replace('%', "%25")
        .replace('/', "%2F")
        .replace('?', "%3F")
        .replace('#', "%23")
}

#[async_trait]
impl Registry for PypiRegistry {
    async fn fetch_unqualified(&self, package_name: &str) -> Result<PackageMetadata, RegistryError> {
        let url = format!(
            "{}/pypi/{}/json",
            self.base_url,
            encode_path_segment(package_name)
        );
        debug!("Fetching PyPI package: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::PackageNotFound {
                package: package_name.to_string(),
                status: response.status().as_u16(),
            });
        }

        let metadata = Self::decode(response, package_name).await?;

        debug!(
            "Found {} release keys for package {}",
            metadata.releases.len(),
            package_name
        );

        Ok(metadata)
    }

    async fn fetch_qualified(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError> {
        let url = format!(
            "{}/pypi/{}/{}/json",
            self.base_url,
            encode_path_segment(package_name),
            encode_path_segment(version)
        );
        debug!("Fetching PyPI release: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::ReleaseNotFound {
                package: package_name.to_string(),
                version: version.to_string(),
                status: response.status().as_u16(),
            });
        }

        Self::decode(response, package_name).await
    }
}
