use serde::{Deserialize, Serialize};

use crate::types::DnsRecord;

/// Unified error type for all GNAME provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// No variant is retried automatically: a failed call ends the enclosing batch
/// and is surfaced to the caller as part of a [`BatchError`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The runtime environment is unusable (fixed signing time zone, HTTP client setup).
    ///
    /// This is an environment defect and will not go away on retry.
    Configuration {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// A request parameter could not be canonicalized for signing.
    Encoding {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The credentials are missing or empty.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API answered with a non-2xx HTTP status.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response envelope reported failure (`code != 1`), whatever the HTTP status was.
    Api {
        /// Provider that produced the error.
        provider: String,
        /// Envelope status code.
        #[serde(rename = "api_code")]
        code: i64,
        /// Vendor message.
        message: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// More than one listed record shares the target's name and type.
    AmbiguousMatch {
        /// Provider that produced the error.
        provider: String,
        /// Record name.
        name: String,
        /// Record type.
        record_type: String,
        /// Number of listed records that matched.
        candidates: usize,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、凭证等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Encoding { .. }
                | Self::InvalidCredentials { .. }
                | Self::Api { .. }
                | Self::AmbiguousMatch { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration { provider, detail } => {
                write!(f, "[{provider}] Configuration error: {detail}")
            }
            Self::Encoding { provider, detail } => {
                write!(f, "[{provider}] Encoding error: {detail}")
            }
            Self::InvalidCredentials { provider, detail } => {
                write!(f, "[{provider}] Invalid credentials: {detail}")
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                provider,
                status,
                body,
            } => {
                write!(f, "[{provider}] HTTP {status}: {body}")
            }
            Self::Api {
                provider,
                code,
                message,
            } => {
                write!(f, "[{provider}] API error (code {code}): {message}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::AmbiguousMatch {
                provider,
                name,
                record_type,
                candidates,
            } => {
                write!(
                    f,
                    "[{provider}] {candidates} records match '{name}' ({record_type}), refusing to pick one"
                )
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Failure of a zone operation (list/append/set/delete).
///
/// Batches are not atomic. Records that were already applied before the
/// failure are returned in [`completed`](Self::completed) so the caller can
/// reconcile partial progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    /// Zone the batch was operating on (normalized, no trailing dot).
    pub zone: String,
    /// `name (type)` of the record being processed, when the failure is record-scoped.
    pub record: Option<String>,
    /// Records confirmed by the API before the failure.
    pub completed: Vec<DnsRecord>,
    /// Underlying cause.
    pub error: ProviderError,
}

impl BatchError {
    /// Failure that happened before any record was processed (e.g. the initial listing).
    pub(crate) fn zone_scoped(zone: &str, error: ProviderError) -> Self {
        Self {
            zone: zone.to_string(),
            record: None,
            completed: Vec::new(),
            error,
        }
    }

    /// Failure while processing `record`.
    pub(crate) fn record_scoped(
        zone: &str,
        record: &DnsRecord,
        completed: Vec<DnsRecord>,
        error: ProviderError,
    ) -> Self {
        Self {
            zone: zone.to_string(),
            record: Some(format!("{} ({})", record.name, record.record_type)),
            completed,
            error,
        }
    }
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.record {
            Some(record) => write!(
                f,
                "zone '{}', record {record}: {} ({} applied before failure)",
                self.zone,
                self.error,
                self.completed.len()
            ),
            None => write!(f, "zone '{}': {}", self.zone, self.error),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Outcome of a batch operation: the affected records, or the partial progress plus the cause.
pub type BatchResult = std::result::Result<Vec<DnsRecord>, BatchError>;
