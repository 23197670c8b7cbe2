//! GNAME DNS Provider

mod http;
mod provider;
mod sign;
mod types;

use std::time::Duration;

use reqwest::Client;
use tokio::sync::OnceCell;

use crate::error::Result;
use crate::providers::common::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client,
};
use crate::types::{GnameCredentials, MatchPolicy};

pub(crate) use sign::Params;
pub(crate) use types::{GnameEnvelope, GnameRecord, GnameResponse, RecordId};

pub(crate) const PROVIDER_NAME: &str = "gname";
pub(crate) const GNAME_API_BASE: &str = "https://api.gname.com";

pub(crate) const ENDPOINT_LIST: &str = "/api/resolution/list";
pub(crate) const ENDPOINT_ADD: &str = "/api/resolution/add";
pub(crate) const ENDPOINT_EDIT: &str = "/api/resolution/edit";
pub(crate) const ENDPOINT_DELETE: &str = "/api/resolution/delete";

/// 信封中表示成功的 code
pub(crate) const SUCCESS_CODE: i64 = 1;
/// 厂商未给出有效 TTL 时使用的默认值（秒）
pub(crate) const DEFAULT_TTL_SECS: u64 = 600;
/// 签名时间戳所用的固定时区（UTC+8）
pub(crate) const SIGNING_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// GNAME DNS provider implementation.
///
/// Authenticates every call with an MD5 token over the sorted request
/// parameters plus the app key.
///
/// # Construction
///
/// ```rust,no_run
/// use gname_provider::{GnameCredentials, GnameProvider};
///
/// let provider = GnameProvider::new(GnameCredentials::new("your-app-id", "your-app-key"));
/// ```
pub struct GnameProvider {
    pub(crate) client: OnceCell<Client>,
    pub(crate) app_id: String,
    pub(crate) app_key: String,
    pub(crate) base_url: String,
    pub(crate) connect_timeout: Duration,
    pub(crate) timeout: Duration,
    pub(crate) match_policy: MatchPolicy,
}

/// Builder for [`GnameProvider`].
pub struct GnameProviderBuilder {
    credentials: GnameCredentials,
    client: Option<Client>,
    base_url: String,
    connect_timeout: Duration,
    timeout: Duration,
    match_policy: MatchPolicy,
}

impl GnameProviderBuilder {
    fn new(credentials: GnameCredentials) -> Self {
        Self {
            credentials,
            client: None,
            base_url: GNAME_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            match_policy: MatchPolicy::default(),
        }
    }

    /// Use a caller-supplied HTTP client. Timeouts set on this builder are then ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Override the API origin (default: `https://api.gname.com`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Total request timeout for the built-in client (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect timeout for the built-in client (default: 10s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// How to treat several listed records sharing a target's name and type.
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Build the [`GnameProvider`] instance.
    pub fn build(self) -> GnameProvider {
        GnameProvider {
            client: OnceCell::new_with(self.client),
            app_id: self.credentials.app_id,
            app_key: self.credentials.app_key,
            base_url: self.base_url,
            connect_timeout: self.connect_timeout,
            timeout: self.timeout,
            match_policy: self.match_policy,
        }
    }
}

impl GnameProvider {
    /// Creates a provider with default settings.
    pub fn new(credentials: GnameCredentials) -> Self {
        Self::builder(credentials).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(credentials: GnameCredentials) -> GnameProviderBuilder {
        GnameProviderBuilder::new(credentials)
    }

    /// HTTP client, built on first use unless one was injected.
    pub(crate) async fn http_client(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                log::debug!("[{PROVIDER_NAME}] Initializing HTTP client");
                create_http_client(PROVIDER_NAME, self.connect_timeout, self.timeout)
            })
            .await
    }
}
