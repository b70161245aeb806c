//! Release version parsing and ordering
//!
//! Release keys published by a registry are not uniformly formatted, so the
//! grammar accepted here is:
//!
//! ```text
//! [v] NUM ( "." NUM )* [ "-" LABEL ] [ "+" BUILD ]
//! ```
//!
//! Any number of numeric components is accepted. Missing trailing components
//! compare as zero, so `1.2` and `1.2.0` are equal. A version without a
//! pre-release label sorts after every labelled version with the same numeric
//! core. Build metadata is kept for display only.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::{BuildMetadata, Prerelease};

use crate::version::error::ParseError;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[vV]?(?P<release>[0-9]+(?:\.[0-9]+)*)(?:-(?P<pre>[^+]*))?(?:\+(?P<build>.*))?$")
        .expect("version pattern compiles")
});

/// A parsed, totally ordered release version
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    release: Vec<u64>,
    pre: Prerelease,
    build: BuildMetadata,
}

impl ParsedVersion {
    /// Parse a version token.
    ///
    /// Fails with [`ParseError::NotAVersion`] when the token does not start with
    /// a numeric component (after an optional `v`), which callers use as the
    /// signal that a token is a name rather than a version.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        let unprefixed = token.strip_prefix(['v', 'V']).unwrap_or(token);
        if !unprefixed.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ParseError::NotAVersion(token.to_string()));
        }

        let malformed = |reason: String| ParseError::Malformed {
            token: token.to_string(),
            reason,
        };

        let captures = VERSION_PATTERN
            .captures(token)
            .ok_or_else(|| malformed("unexpected characters".to_string()))?;

        let release = captures["release"]
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|e| malformed(format!("component '{}': {}", part, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match captures.name("pre").map(|m| m.as_str()) {
            None => Prerelease::EMPTY,
            Some("") => return Err(malformed("empty pre-release label".to_string())),
            Some(label) => Prerelease::new(label)
                .map_err(|e| malformed(format!("pre-release label '{}': {}", label, e)))?,
        };

        let build = match captures.name("build").map(|m| m.as_str()) {
            None => BuildMetadata::EMPTY,
            Some("") => return Err(malformed("empty build metadata".to_string())),
            Some(meta) => BuildMetadata::new(meta)
                .map_err(|e| malformed(format!("build metadata '{}': {}", meta, e)))?,
        };

        Ok(Self {
            release,
            pre,
            build,
        })
    }

    /// Numeric release components as written
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn major(&self) -> u64 {
        self.component(0)
    }

    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    pub fn patch(&self) -> u64 {
        self.component(2)
    }

    /// Pre-release label, empty for a stable release
    pub fn pre_release(&self) -> &str {
        self.pre.as_str()
    }

    pub fn build_metadata(&self) -> &str {
        self.build.as_str()
    }

    /// A release is stable when it carries no pre-release label
    pub fn is_stable(&self) -> bool {
        self.pre.is_empty()
    }

    fn component(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for ParsedVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.release.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
        }
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.release.len().max(other.release.len());
        (0..width)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_pre_release(&self.pre, &other.pre))
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParsedVersion {}

impl AsRef<ParsedVersion> for ParsedVersion {
    fn as_ref(&self) -> &ParsedVersion {
        self
    }
}

// stable > any label on the same core
fn compare_pre_release(a: &Prerelease, b: &Prerelease) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}
