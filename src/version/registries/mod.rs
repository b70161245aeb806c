//! Concrete registry implementations

pub mod pypi;

pub use pypi::PypiRegistry;
