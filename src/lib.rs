//! Query PyPI for package versions, dependencies and metadata.
//!
//! # Modules
//!
//! - [`version`]: version parsing, release channels, selection and the registry client
//! - [`query`]: command-line token disambiguation and per-package resolution
//! - [`output`]: text and JSON rendering of query outcomes
//! - [`config`]: configuration file and data paths

pub mod config;
pub mod output;
pub mod query;
pub mod version;
