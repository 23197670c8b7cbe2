//! # gname-provider
//!
//! A DNS provider adapter for the [GNAME](https://www.gname.com/) registrar API.
//!
//! Every call is a form-encoded POST signed with an MD5 token over the sorted
//! request parameters plus the application key. Vendor records are mapped to a
//! generic [`DnsRecord`]; set and delete find their targets by listing the
//! zone and matching on (name, type).
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! gname-provider = "0.1"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use gname_provider::{create_provider, DnsRecord, GnameCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider from credentials
//!     let provider = create_provider(GnameCredentials::from_env()?)?;
//!
//!     // 2. List the zone
//!     for record in provider.get_records("example.com.").await? {
//!         println!("{} {} -> {}", record.name, record.record_type, record.value);
//!     }
//!
//!     // 3. Upsert a TXT record by (name, type)
//!     let txt = DnsRecord::new("_acme-challenge", "TXT", "token", Duration::from_secs(600));
//!     let applied = provider.set_records("example.com.", &[txt]).await?;
//!     println!("applied {} record(s)", applied.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Zone operations (list, append, set, delete) return [`BatchResult`]. On
//! failure the [`BatchError`] names the zone and, for writes, the record that
//! failed, and carries the records applied before it. The cause is a
//! [`ProviderError`], also returned directly by
//! [`validate_credentials`](DnsProvider::validate_credentials).
//!
//! - [`ProviderError::Api`]: the response envelope reported `code != 1`
//! - [`ProviderError::HttpStatus`]: non-2xx status, raw body kept
//! - [`ProviderError::AmbiguousMatch`]: several listed records share a (name, type)
//!
//! Nothing is retried automatically.

mod error;
mod factory;
mod http_client;
mod providers;
pub mod reconcile;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{BatchError, BatchResult, ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

pub use traits::DnsProvider;

// Re-export types
pub use types::{
    CredentialValidationError, DnsRecord, ENV_APP_ID, ENV_APP_KEY, GnameCredentials, MatchPolicy,
};

pub use providers::{GnameProvider, GnameProviderBuilder};
