//! GNAME API type definition

use serde::Deserialize;

use crate::utils::lenient;

// ============ Response envelope ============

/// Status part of every response, read before the endpoint payload.
#[derive(Debug, Deserialize)]
pub struct GnameEnvelope {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

/// Endpoint payload of a response whose envelope already passed the `code` check.
#[derive(Debug, Deserialize)]
pub struct GnameResponse<T> {
    pub data: Option<T>,
    /// 以下分页字段仅 list 接口返回
    pub count: Option<i64>,
    pub page: Option<i64>,
    #[serde(rename = "pagesize")]
    pub page_size: Option<i64>,
}

// ============ Record related structure ============

/// DNS record item returned by `/api/resolution/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct GnameRecord {
    /// 解析记录 ID
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// 主机记录
    #[serde(default)]
    pub zjt: String,
    /// 记录类型
    #[serde(default)]
    pub lx: String,
    /// 记录值
    #[serde(default)]
    pub jxz: String,
    /// MX 优先级
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub mx: Option<String>,
    /// TTL（秒）
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub ttl: Option<String>,
}

/// Record id returned by `/api/resolution/add` (number) and `/api/resolution/edit` (string).
#[derive(Debug, Clone, Deserialize)]
pub struct RecordId(#[serde(deserialize_with = "lenient::string")] pub String);
