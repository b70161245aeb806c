//! Query request and outcome types

use std::fmt;

use crate::query::error::ResolveError;
use crate::version::types::PackageInfo;

/// Literal accepted in the version slot to ask for the registry's current version
pub const LATEST: &str = "latest";

/// What version of a package a request asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// Resolve through the registry's current-version field
    Latest,
    /// An exact release key as typed by the user
    Exact(String),
}

impl VersionSpec {
    /// Interpret a version-slot token, treating any casing of `latest` as the sentinel
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case(LATEST) {
            VersionSpec::Latest
        } else {
            VersionSpec::Exact(token.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VersionSpec::Latest => LATEST,
            VersionSpec::Exact(version) => version,
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (package, version spec) pair to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub package: String,
    pub spec: VersionSpec,
}

impl QueryRequest {
    pub fn new(package: impl Into<String>, spec: VersionSpec) -> Self {
        Self {
            package: package.into(),
            spec,
        }
    }

    pub fn latest(package: impl Into<String>) -> Self {
        Self::new(package, VersionSpec::Latest)
    }

    pub fn exact(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(package, VersionSpec::Exact(version.into()))
    }
}

/// Which question is asked about each requested package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// List published versions, or only the latest one
    Versions,
    /// Requirement strings of one concrete release
    Dependencies,
    /// Package-level metadata
    Metadata,
}

/// Successful answer for one request
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Release keys in ascending order
    Versions(Vec<String>),
    /// The greatest qualifying release key
    Latest(String),
    Dependencies {
        version: String,
        /// Whether `version` came from the registry's current-version field
        via_latest: bool,
        requirements: Vec<String>,
    },
    Metadata(Box<PackageInfo>),
}

/// Result for one request, kept next to the request it answers
#[derive(Debug)]
pub struct QueryOutcome {
    pub kind: QueryKind,
    pub request: QueryRequest,
    pub result: Result<Resolution, ResolveError>,
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
