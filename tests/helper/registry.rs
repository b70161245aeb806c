//! Registry test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pypi_versions::query::{QueryOptions, QueryResolver};
use pypi_versions::version::error::RegistryError;
use pypi_versions::version::registry::Registry;
use pypi_versions::version::types::{PackageInfo, PackageMetadata, ReleaseSet};

/// In-memory registry serving canned metadata
#[derive(Default)]
pub struct StubRegistry {
    packages: HashMap<String, PackageMetadata>,
    releases: HashMap<(String, String), PackageMetadata>,
    calls: Mutex<Vec<String>>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package whose current version is `current` and whose
    /// release keys are `keys`, in the order the index lists them.
    pub fn with_package(mut self, name: &str, current: &str, keys: &[&str]) -> Self {
        let metadata = PackageMetadata {
            info: PackageInfo {
                name: name.to_string(),
                version: current.to_string(),
                ..Default::default()
            },
            releases: ReleaseSet::from_keys(keys.iter().copied()),
        };
        self.packages.insert(name.to_string(), metadata);
        self
    }

    /// Register the requirement strings of one release
    pub fn with_release(mut self, name: &str, version: &str, requires: &[&str]) -> Self {
        let metadata = PackageMetadata {
            info: PackageInfo {
                name: name.to_string(),
                version: version.to_string(),
                requires_dist: requires.iter().map(|r| r.to_string()).collect(),
                ..Default::default()
            },
            releases: ReleaseSet::default(),
        };
        self.releases
            .insert((name.to_string(), version.to_string()), metadata);
        self
    }

    /// Every lookup made so far, as `name` or `name@version`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Registry for StubRegistry {
    async fn fetch_unqualified(&self, package_name: &str) -> Result<PackageMetadata, RegistryError> {
        self.record(package_name.to_string());
        self.packages
            .get(package_name)
            .cloned()
            .ok_or_else(|| RegistryError::PackageNotFound {
                package: package_name.to_string(),
                status: 404,
            })
    }

    async fn fetch_qualified(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<PackageMetadata, RegistryError> {
        self.record(format!("{}@{}", package_name, version));
        self.releases
            .get(&(package_name.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| RegistryError::ReleaseNotFound {
                package: package_name.to_string(),
                version: version.to_string(),
                status: 404,
            })
    }
}

/// Create a resolver over a shared stub so tests can inspect its calls afterwards
pub fn create_test_resolver(
    registry: StubRegistry,
    options: QueryOptions,
) -> (Arc<StubRegistry>, QueryResolver) {
    let registry = Arc::new(registry);
    let resolver = QueryResolver::new(registry.clone(), options);
    (registry, resolver)
}
