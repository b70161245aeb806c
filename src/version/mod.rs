//! Version layer: parsing, channel filtering, selection and registry access
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Parser    │────▶│   Channel   │────▶│  Selector   │
//! │ (release    │     │ (key ->     │     │ (stable /   │     │ (all sorted │
//! │  keys)      │     │  version)   │     │  pre-rel.)  │     │  / latest)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`parser`]: `ParsedVersion`, the totally ordered version value
//! - [`channel`]: stable vs pre-release classification and the include policy
//! - [`selector`]: release key parsing, ascending listing and latest selection
//! - [`registry`]: Registry trait for fetching metadata from remote sources
//! - [`registries`]: Concrete registry implementations (PyPI)
//! - [`error`]: Error types for parsing, selection and registry operations
//! - [`types`]: Registry data model (`PackageMetadata`, `ReleaseSet`)

pub mod channel;
pub mod error;
pub mod parser;
pub mod registries;
pub mod registry;
pub mod selector;
pub mod types;
