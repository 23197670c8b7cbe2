//! Provider factory functions.

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::providers::GnameProvider;
use crate::traits::DnsProvider;
use crate::types::GnameCredentials;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// Empty fields are rejected up front instead of on the first request.
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use gname_provider::{create_provider, GnameCredentials};
///
/// let provider = create_provider(GnameCredentials::new("your-app-id", "your-app-key"));
/// assert!(provider.is_ok());
/// ```
pub fn create_provider(credentials: GnameCredentials) -> Result<Arc<dyn DnsProvider>> {
    for (field, value) in [
        ("app_id", &credentials.app_id),
        ("app_key", &credentials.app_key),
    ] {
        if value.trim().is_empty() {
            return Err(ProviderError::InvalidCredentials {
                provider: "gname".to_string(),
                detail: format!("{field} must not be empty"),
            });
        }
    }

    Ok(Arc::new(GnameProvider::new(credentials)))
}
