//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod gname;

pub use gname::{GnameProvider, GnameProviderBuilder};
