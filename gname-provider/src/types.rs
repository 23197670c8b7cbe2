use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// A DNS resource record as seen by callers.
///
/// `name` is relative to the zone (`"www"`, `"@"`, `"_acme-challenge"`).
/// `record_type` and `value` are passed to the API verbatim.
///
/// `id` is the vendor-assigned identifier. Records built by callers usually
/// leave it empty; records returned by the provider always carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Vendor record identifier, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record name relative to the zone.
    pub name: String,
    /// Record type (`A`, `AAAA`, `CNAME`, `TXT`, `MX`, ...).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record data.
    pub value: String,
    /// Time to live. Sent to the API in whole seconds.
    #[serde(with = "ttl_secs")]
    pub ttl: Duration,
    /// MX preference, sent as `mx` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl DnsRecord {
    /// Builds a record without a vendor id or priority.
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
            ttl,
            priority: None,
        }
    }

    /// Returns `true` when `other` has the same (name, type) identity.
    pub fn same_identity(&self, other: &DnsRecord) -> bool {
        self.name == other.name && self.record_type == other.record_type
    }

    /// Returns a copy carrying the given vendor id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

mod ttl_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// How set/delete pick a listed record when several share the target's (name, type).
///
/// The listing order returned by the API is not documented as stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchPolicy {
    /// Fail the batch with [`AmbiguousMatch`](crate::ProviderError::AmbiguousMatch).
    #[default]
    RejectAmbiguous,
    /// Use the first listed candidate.
    FirstMatch,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// GNAME API credentials.
///
/// Serialized with the field names used in provider configuration files:
///
/// ```json
/// { "app_id": "...", "app_key": "..." }
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct GnameCredentials {
    /// Application id, sent as `appid` on every call.
    pub app_id: String,
    /// Application key, the shared signing secret. Never sent on the wire.
    pub app_key: String,
}

impl std::fmt::Debug for GnameCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GnameCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"****")
            .finish()
    }
}

/// Environment variable holding the application id.
pub const ENV_APP_ID: &str = "GNAME_APP_ID";
/// Environment variable holding the application key.
pub const ENV_APP_KEY: &str = "GNAME_APP_KEY";

impl GnameCredentials {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
        }
    }

    /// Construct credentials from a `HashMap`, validating required fields.
    ///
    /// Useful for credentials stored in a flat key-value format.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            app_id: Self::get_required_field(map.get("appId"), "appId", "APP ID")?,
            app_key: Self::get_required_field(map.get("appKey"), "appKey", "APP Key")?,
        })
    }

    /// Read credentials from `GNAME_APP_ID` / `GNAME_APP_KEY`.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        let app_id = std::env::var(ENV_APP_ID).ok();
        let app_key = std::env::var(ENV_APP_KEY).ok();
        Ok(Self {
            app_id: Self::get_required_field(app_id.as_ref(), ENV_APP_ID, "APP ID")?,
            app_key: Self::get_required_field(app_key.as_ref(), ENV_APP_KEY, "APP Key")?,
        })
    }

    fn get_required_field(
        value: Option<&String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match value {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> HashMap<String, String> {
        [
            ("appId".to_string(), self.app_id.clone()),
            ("appKey".to_string(), self.app_key.clone()),
        ]
        .into()
    }
}
