//! Registry data model as decoded from the PyPI JSON API

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Metadata for a package, or for one release of it
///
/// `releases` is only populated by the unqualified (package-level) endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageMetadata {
    pub info: PackageInfo,
    #[serde(default)]
    pub releases: ReleaseSet,
}

/// The `info` block of a PyPI response
///
/// PyPI sends `null` for most unset fields; those decode to empty values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackageInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Current version as reported by the registry
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub license: String,
    #[serde(deserialize_with = "null_as_default")]
    pub home_page: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_url: String,
    /// Declared requirement strings, e.g. `numpy>=1.22.4`
    #[serde(deserialize_with = "null_as_default")]
    pub requires_dist: Vec<String>,
}

/// Published release keys, in registry order
///
/// The per-release file lists are skipped while decoding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ReleaseSet(IndexMap<String, IgnoredAny>);

impl ReleaseSet {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(|k| (k.into(), IgnoredAny)).collect())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
