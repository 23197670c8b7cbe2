//! GNAME MD5 请求签名
//!
//! 1. 参数按 key 的 ASCII 字节序排序，value 做表单编码，拼成 `k=v&k=v`
//! 2. `gntoken` = MD5(排序串 + app key) 的大写十六进制
//! 3. 请求体 = 排序串 + `&gntoken=` + token

use std::collections::BTreeMap;

use chrono::{FixedOffset, Utc};

use crate::error::{ProviderError, Result};

use super::{GnameProvider, PROVIDER_NAME, SIGNING_UTC_OFFSET_SECS};

/// 请求参数。`BTreeMap<String, _>` 的迭代顺序即字节序。
pub(crate) type Params = BTreeMap<String, String>;

/// 时间戳参数名
pub(crate) const TIME_PARAM: &str = "gntime";
/// 签名参数名
pub(crate) const TOKEN_PARAM: &str = "gntoken";

/// 一次性的已签名请求
#[derive(Debug, Clone)]
pub(crate) struct SignedRequest {
    pub endpoint: String,
    /// 排序后的参数串（不含 token）
    pub canonical: String,
    pub token: String,
    /// 表单请求体
    pub body: String,
}

impl GnameProvider {
    /// 用本实例的 app key 签名
    pub(crate) fn sign(
        &self,
        endpoint: &str,
        params: Params,
        timestamp: i64,
    ) -> Result<SignedRequest> {
        sign_params(endpoint, params, timestamp, &self.app_key)
    }
}

/// 当前时间在 UTC+8 下的 Unix 时间戳
pub(crate) fn signing_timestamp() -> Result<i64> {
    let offset = FixedOffset::east_opt(SIGNING_UTC_OFFSET_SECS).ok_or_else(|| {
        ProviderError::Configuration {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("invalid signing UTC offset: {SIGNING_UTC_OFFSET_SECS}s"),
        }
    })?;
    Ok(Utc::now().with_timezone(&offset).timestamp())
}

/// 把 `gntime` 并入参数后签名
pub(crate) fn sign_params(
    endpoint: &str,
    mut params: Params,
    timestamp: i64,
    secret: &str,
) -> Result<SignedRequest> {
    for key in params.keys() {
        validate_key(key)?;
    }
    params.insert(TIME_PARAM.to_string(), timestamp.to_string());

    let canonical = canonicalize(&params);
    let digest = md5::compute(format!("{canonical}{secret}"));
    let token = hex::encode_upper(digest.0);
    let body = format!("{canonical}&{TOKEN_PARAM}={token}");

    Ok(SignedRequest {
        endpoint: endpoint.to_string(),
        canonical,
        token,
        body,
    })
}

/// 排序并拼接参数（key 原样，value 表单编码）
pub(crate) fn canonicalize(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", form_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// 表单编码：非保留字符以外一律 `%XX`，空格写作 `+`
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// key 不做编码，只能是不含 `&`、`=` 的可见 ASCII，且不能占用保留名
fn validate_key(key: &str) -> Result<()> {
    let detail = if key.is_empty() {
        Some("empty parameter name".to_string())
    } else if key == TIME_PARAM || key == TOKEN_PARAM {
        Some(format!("parameter name '{key}' is reserved"))
    } else if !key.bytes().all(|b| b.is_ascii_graphic() && b != b'&' && b != b'=') {
        Some(format!("parameter name '{key}' cannot be encoded"))
    } else {
        None
    };

    match detail {
        Some(detail) => Err(ProviderError::Encoding {
            provider: PROVIDER_NAME.to_string(),
            detail,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1_700_000_000;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn sign(pairs: &[(&str, &str)], ts: i64, secret: &str) -> SignedRequest {
        let res = sign_params("/api/resolution/list", params(pairs), ts, secret);
        assert!(res.is_ok(), "sign_params failed: {res:?}");
        res.unwrap_or_else(|_| unreachable!())
    }

    // ---- 排序 ----

    #[test]
    fn canonical_sorted_by_ascii_bytes() {
        // 'Z' (0x5A) < '_' (0x5F) < 'a' (0x61)
        let p = params(&[("ym", "1"), ("_x", "2"), ("Zeta", "3"), ("appid", "4")]);
        assert_eq!(canonicalize(&p), "Zeta=3&_x=2&appid=4&ym=1");
    }

    #[test]
    fn canonical_includes_timestamp() {
        let signed = sign(&[("appid", "GN123"), ("ym", "example.com")], TS, "secret");
        assert_eq!(
            signed.canonical,
            "appid=GN123&gntime=1700000000&ym=example.com"
        );
    }

    // ---- 编码 ----

    #[test]
    fn values_are_form_encoded() {
        let p = params(&[("jlz", "v=spf1 include:_spf.example.com ~all")]);
        assert_eq!(
            canonicalize(&p),
            "jlz=v%3Dspf1+include%3A_spf.example.com+~all"
        );
    }

    #[test]
    fn non_ascii_values_are_percent_encoded() {
        let p = params(&[("zj", "中")]);
        assert_eq!(canonicalize(&p), "zj=%E4%B8%AD");
    }

    #[test]
    fn reserved_key_rejected() {
        let res = sign_params("/x", params(&[("gntoken", "forged")]), TS, "secret");
        assert!(
            matches!(&res, Err(ProviderError::Encoding { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn unencodable_key_rejected() {
        for key in ["", "a&b", "a=b", "a b"] {
            let res = sign_params("/x", params(&[(key, "v")]), TS, "secret");
            assert!(
                matches!(&res, Err(ProviderError::Encoding { .. })),
                "key {key:?} should be rejected, got {res:?}"
            );
        }
    }

    // ---- token ----

    #[test]
    fn token_is_uppercase_md5_of_canonical_plus_secret() {
        let signed = sign(&[("appid", "GN123"), ("ym", "example.com")], TS, "secret");
        assert_eq!(signed.token, "AEDB03E233B026D12D5EC98C9EF4ADA7");
        assert_eq!(
            signed.body,
            "appid=GN123&gntime=1700000000&ym=example.com&gntoken=AEDB03E233B026D12D5EC98C9EF4ADA7"
        );
    }

    #[test]
    fn token_snapshot_with_encoded_values() {
        let signed = sign(
            &[
                ("appid", "GN123"),
                ("ym", "example.com"),
                ("lx", "TXT"),
                ("zj", "_acme-challenge"),
                ("jlz", "v=spf1 include:_spf.example.com ~all"),
                ("ttl", "600"),
            ],
            TS,
            "secret",
        );
        assert_eq!(signed.token, "4494C4FD8B74576C59C5D82B85CF0393");
    }

    // ---- 确定性 ----

    #[test]
    fn sign_deterministic() {
        let a = sign(&[("appid", "GN123"), ("ym", "example.com")], TS, "secret");
        let b = sign(&[("ym", "example.com"), ("appid", "GN123")], TS, "secret");
        assert_eq!(a.body, b.body, "same inputs should produce identical output");
    }

    #[test]
    fn sign_changes_with_value_secret_or_time() {
        let base = sign(&[("appid", "GN123"), ("ym", "a.com")], TS, "secret").token;
        let other_value = sign(&[("appid", "GN123"), ("ym", "b.com")], TS, "secret").token;
        let other_secret = sign(&[("appid", "GN123"), ("ym", "a.com")], TS, "secret2").token;
        let other_time = sign(&[("appid", "GN123"), ("ym", "a.com")], TS + 1, "secret").token;

        assert_ne!(base, other_value);
        assert_ne!(base, other_secret);
        assert_ne!(base, other_time);
    }

    #[test]
    fn signing_timestamp_is_unix_seconds() {
        let res = signing_timestamp();
        assert!(res.is_ok(), "unexpected error: {res:?}");
        let ts = res.unwrap_or_default();
        let now = Utc::now().timestamp();
        assert!((now - ts).abs() <= 5, "timestamp {ts} far from {now}");
    }
}
