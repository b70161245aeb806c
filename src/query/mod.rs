//! Query layer: from command-line tokens to per-package outcomes
//!
//! # Modules
//!
//! - [`tokens`]: splits a flat token stream into (package, version) requests
//! - [`resolver`]: resolves each request against a registry
//! - [`types`]: request, spec and outcome types
//! - [`error`]: per-package failure kinds

pub mod error;
pub mod resolver;
pub mod tokens;
pub mod types;

pub use error::ResolveError;
pub use resolver::{QueryOptions, QueryResolver};
pub use types::{QueryKind, QueryOutcome, QueryRequest, Resolution, VersionSpec};
