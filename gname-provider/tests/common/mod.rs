//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use gname_provider::{
    DnsProvider, DnsRecord, GnameCredentials, GnameProvider, MatchPolicy, create_provider,
};
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Err`，并解包返回错误值。
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

pub const MOCK_APP_ID: &str = "GN123";
pub const MOCK_APP_KEY: &str = "secret";
pub const MOCK_ZONE: &str = "example.com";

pub const LIST_PATH: &str = "/api/resolution/list";
pub const ADD_PATH: &str = "/api/resolution/add";
pub const EDIT_PATH: &str = "/api/resolution/edit";
pub const DELETE_PATH: &str = "/api/resolution/delete";

/// 指向 mock server 的 provider
pub fn mock_provider(server: &MockServer) -> GnameProvider {
    mock_provider_with_policy(server, MatchPolicy::default())
}

pub fn mock_provider_with_policy(server: &MockServer, policy: MatchPolicy) -> GnameProvider {
    GnameProvider::builder(GnameCredentials::new(MOCK_APP_ID, MOCK_APP_KEY))
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .match_policy(policy)
        .build()
}

/// 成功信封
pub fn ok_body(data: &str) -> String {
    format!(r#"{{"code":1,"msg":"success","data":{data}}}"#)
}

/// 列表响应，`records` 为 (id, zjt, lx, jxz, ttl)
pub fn list_body(records: &[(&str, &str, &str, &str, u64)]) -> String {
    let items: Vec<String> = records
        .iter()
        .map(|(id, name, lx, value, ttl)| {
            format!(
                r#"{{"id":"{id}","ym":"{MOCK_ZONE}","zjt":"{name}","lx":"{lx}","jxz":"{value}","mx":0,"ttl":{ttl},"xlid":0,"zt":1}}"#
            )
        })
        .collect();
    format!(
        r#"{{"code":1,"msg":"success","count":{},"page":1,"pagesize":100,"data":[{}]}}"#,
        records.len(),
        items.join(",")
    )
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 在线测试上下文
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub domain: String,
}

impl TestContext {
    /// 从 `GNAME_APP_ID` / `GNAME_APP_KEY` / `TEST_DOMAIN` 创建
    pub fn gname() -> Option<Self> {
        let credentials = GnameCredentials::from_env().ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let provider = create_provider(credentials).ok()?;
        Some(Self { provider, domain })
    }

    /// 按 (name, type) 在 zone 中查找
    pub async fn find_record(&self, name: &str, record_type: &str) -> Option<DnsRecord> {
        let records = self.provider.get_records(&self.domain).await.ok()?;
        records
            .into_iter()
            .find(|r| r.name == name && r.record_type == record_type)
    }

    /// 清理测试记录（忽略错误）
    pub async fn cleanup(&self, record: &DnsRecord) {
        if let Err(e) = self
            .provider
            .delete_records(&self.domain, std::slice::from_ref(record))
            .await
        {
            eprintln!("清理测试记录失败: {e}");
        }
    }
}
