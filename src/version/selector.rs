//! Ordering and selection over a set of release keys

use std::cmp::Ordering;

use tracing::debug;

use crate::version::error::NotFoundError;
use crate::version::parser::ParsedVersion;

/// A release key together with its parsed version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub version: ParsedVersion,
}

impl Candidate {
    pub fn new(key: impl Into<String>, version: ParsedVersion) -> Self {
        Self {
            key: key.into(),
            version,
        }
    }
}

impl AsRef<ParsedVersion> for Candidate {
    fn as_ref(&self) -> &ParsedVersion {
        &self.version
    }
}

// Equal versions from distinct keys (1.0 vs 1.0.0) fall back to the key.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parse every release key, silently dropping the ones that are not versions.
///
/// Registries carry legacy keys that predate any versioning scheme, so an
/// unparseable key is not an error here.
pub fn parse_release_keys<'a, I>(keys: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter()
        .filter_map(|key| match ParsedVersion::parse(key) {
            Ok(version) => Some(Candidate::new(key, version)),
            Err(e) => {
                debug!("Skipping release key: {}", e);
                None
            }
        })
        .collect()
}

/// All candidates in ascending order
pub fn select_all(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort();
    candidates
}

/// The greatest candidate, or [`NotFoundError`] when there is none
pub fn select_latest(candidates: Vec<Candidate>) -> Result<Candidate, NotFoundError> {
    candidates.into_iter().max().ok_or(NotFoundError)
}
