//! Per-package query resolution against a registry
//!
//! Each request is resolved independently: a failure is recorded in that
//! request's outcome and the run moves on to the next one. Outcomes always
//! come back in request order.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::query::error::ResolveError;
use crate::query::types::{QueryKind, QueryOutcome, QueryRequest, Resolution, VersionSpec};
use crate::version::channel::ChannelFilter;
use crate::version::parser::ParsedVersion;
use crate::version::registry::Registry;
use crate::version::selector::{parse_release_keys, select_all, select_latest};

/// Options threaded through every resolution of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub channel: ChannelFilter,
    /// Report only the greatest qualifying version when listing
    pub latest_only: bool,
    /// Number of requests in flight at once; 1 means strictly sequential
    pub concurrency: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            channel: ChannelFilter::default(),
            latest_only: false,
            concurrency: 1,
        }
    }
}

pub struct QueryResolver {
    registry: Arc<dyn Registry>,
    options: QueryOptions,
}

impl QueryResolver {
    pub fn new(registry: Arc<dyn Registry>, options: QueryOptions) -> Self {
        Self { registry, options }
    }

    /// Resolve every request, returning one outcome per request in input order.
    pub async fn run(&self, kind: QueryKind, requests: Vec<QueryRequest>) -> Vec<QueryOutcome> {
        stream::iter(requests)
            .map(|request| async move {
                let result = self.resolve(kind, &request).await;
                if let Err(e) = &result {
                    warn!(
                        "Failed to resolve {}@{}: {}",
                        request.package, request.spec, e
                    );
                }
                QueryOutcome {
                    kind,
                    request,
                    result,
                }
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await
    }

    pub async fn resolve(
        &self,
        kind: QueryKind,
        request: &QueryRequest,
    ) -> Result<Resolution, ResolveError> {
        match kind {
            QueryKind::Versions => self.resolve_versions(request).await,
            QueryKind::Dependencies => self.resolve_dependencies(request).await,
            QueryKind::Metadata => self.resolve_metadata(request).await,
        }
    }

    /// List the qualifying versions of a package, or only the latest one.
    ///
    /// Release keys that do not parse are dropped without error.
    pub async fn resolve_versions(&self, request: &QueryRequest) -> Result<Resolution, ResolveError> {
        let metadata = self.registry.fetch_unqualified(&request.package).await?;

        let candidates = self
            .options
            .channel
            .apply(parse_release_keys(metadata.releases.keys()));
        let no_qualifying = || ResolveError::NoQualifyingVersions {
            package: request.package.clone(),
        };

        if self.options.latest_only {
            let latest = select_latest(candidates).map_err(|_| no_qualifying())?;
            info!("Latest version of {} is {}", request.package, latest.key);
            return Ok(Resolution::Latest(latest.key));
        }

        let sorted = select_all(candidates);
        if sorted.is_empty() {
            return Err(no_qualifying());
        }
        info!(
            "Found {} qualifying versions for {}",
            sorted.len(),
            request.package
        );
        Ok(Resolution::Versions(
            sorted.into_iter().map(|candidate| candidate.key).collect(),
        ))
    }

    /// Requirement strings of one release, resolving `latest` through the registry first.
    pub async fn resolve_dependencies(
        &self,
        request: &QueryRequest,
    ) -> Result<Resolution, ResolveError> {
        let (version, via_latest) = match &request.spec {
            VersionSpec::Latest => (self.current_version(&request.package).await?, true),
            VersionSpec::Exact(version) => {
                ParsedVersion::parse(version).map_err(|source| ResolveError::InvalidVersion {
                    package: request.package.clone(),
                    source,
                })?;
                (version.clone(), false)
            }
        };

        let metadata = self
            .registry
            .fetch_qualified(&request.package, &version)
            .await?;

        info!(
            "Resolved {} dependencies for {} {}",
            metadata.info.requires_dist.len(),
            request.package,
            version
        );

        Ok(Resolution::Dependencies {
            version,
            via_latest,
            requirements: metadata.info.requires_dist,
        })
    }

    pub async fn resolve_metadata(&self, request: &QueryRequest) -> Result<Resolution, ResolveError> {
        let metadata = self.registry.fetch_unqualified(&request.package).await?;
        Ok(Resolution::Metadata(Box::new(metadata.info)))
    }

    // The registry's own idea of "latest", not the greatest release key.
    async fn current_version(&self, package: &str) -> Result<String, ResolveError> {
        let metadata = self.registry.fetch_unqualified(package).await?;
        let version = metadata.info.version.trim();
        if version.is_empty() {
            return Err(ResolveError::UpstreamMalformed {
                package: package.to_string(),
            });
        }
        info!("Latest version of {} is {}", package, version);
        Ok(version.to_string())
    }
}
