//! Release channel classification and filtering

use crate::version::parser::ParsedVersion;

/// Release channel a version was published on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChannel {
    Stable,
    PreRelease,
}

impl ReleaseChannel {
    pub fn of(version: &ParsedVersion) -> Self {
        if version.is_stable() {
            ReleaseChannel::Stable
        } else {
            ReleaseChannel::PreRelease
        }
    }
}

/// Include/exclude policy for pre-release versions
///
/// Applied to a whole release set before any ordering or selection.
/// Pre-releases are excluded by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelFilter {
    pub include_prerelease: bool,
}

impl ChannelFilter {
    pub fn new(include_prerelease: bool) -> Self {
        Self { include_prerelease }
    }

    pub fn admits(&self, version: &ParsedVersion) -> bool {
        self.include_prerelease || ReleaseChannel::of(version) == ReleaseChannel::Stable
    }

    /// Keep only the items whose version this filter admits.
    ///
    /// The result may be empty; callers report that as "no qualifying versions".
    pub fn apply<T, I>(&self, items: I) -> Vec<T>
    where
        T: AsRef<ParsedVersion>,
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .filter(|item| self.admits(item.as_ref()))
            .collect()
    }
}
