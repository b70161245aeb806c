//! Splitting a flat command-line token stream into (package, version) requests
//!
//! `ppv deps pandas 1.5.3 requests numpy latest` carries no separator between
//! one request and the next, so requests are recovered with a greedy,
//! one-token lookahead:
//!
//! 1. The current token is always a package name.
//! 2. If the next token is a version spec (it parses as a version, or is
//!    `latest` in any casing) it is bound to that package and both tokens are
//!    consumed.
//! 3. Otherwise the package gets an implicit `latest` and the next token
//!    starts a new request.
//!
//! There is no backtracking. A version-less package followed by a package
//! whose name itself parses as a version (`foo 2048`) always reads as
//! `foo==2048`. The token grammar cannot tell those apart; write
//! `name@version` to bind a version explicitly instead.
//!
//! Tokens containing `=`, `>` or `<` are never accepted as a version spec,
//! so a range such as `>=1.0` in the version slot is read as the next
//! package name.

use crate::query::types::{LATEST, QueryRequest, VersionSpec};
use crate::version::parser::ParsedVersion;

const RANGE_OPERATORS: &[char] = &['=', '>', '<'];

/// Whether a token in the version slot is bound to the preceding package
pub fn is_version_spec(token: &str) -> bool {
    if token.contains(RANGE_OPERATORS) {
        return false;
    }
    token.eq_ignore_ascii_case(LATEST) || ParsedVersion::parse(token).is_ok()
}

/// Partition a token stream into requests, left to right.
pub fn disambiguate<S: AsRef<str>>(tokens: &[S]) -> Vec<QueryRequest> {
    let mut requests = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index].as_ref();
        index += 1;

        if let Some(request) = split_compound(token) {
            requests.push(request);
            continue;
        }

        let spec = match tokens.get(index).map(AsRef::as_ref) {
            Some(next) if is_version_spec(next) => {
                index += 1;
                VersionSpec::from_token(next)
            }
            _ => VersionSpec::Latest,
        };
        requests.push(QueryRequest::new(token, spec));
    }

    requests
}

/// Every token is a package name; used by the listing and metadata commands.
pub fn packages<S: AsRef<str>>(tokens: &[S]) -> Vec<QueryRequest> {
    tokens
        .iter()
        .map(|token| QueryRequest::latest(token.as_ref()))
        .collect()
}

// `name@version` / `name@latest`; the version is validated during resolution
fn split_compound(token: &str) -> Option<QueryRequest> {
    let (name, version) = token.split_once('@')?;
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some(QueryRequest::new(name, VersionSpec::from_token(version)))
}
