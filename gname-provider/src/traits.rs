use async_trait::async_trait;

use crate::error::{BatchResult, Result};
use crate::types::DnsRecord;

/// DNS 记录管理 Trait
///
/// `zone` 可以带末尾的点（`example.com.`），实现方在使用前去掉。
/// 批量操作按输入顺序逐条执行，遇到第一个错误即停止，
/// 已成功的记录随 [`BatchError`](crate::BatchError) 一并返回。
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 验证凭证是否有效
    ///
    /// 对 `zone` 做一次列表请求：成功返回 `true`，API 拒绝返回 `false`，
    /// 网络等其他错误照常返回 `Err`。
    async fn validate_credentials(&self, zone: &str) -> Result<bool>;

    /// 列出 zone 下全部记录（均带厂商 ID）
    ///
    /// 失败时的 [`BatchError`](crate::BatchError) 带上 zone，`completed` 为空。
    async fn get_records(&self, zone: &str) -> BatchResult;

    /// 逐条新建记录，不做匹配
    async fn append_records(&self, zone: &str, records: &[DnsRecord]) -> BatchResult;

    /// 按 (name, type) 匹配：已存在则修改，不存在则新建
    async fn set_records(&self, zone: &str, records: &[DnsRecord]) -> BatchResult;

    /// 按 (name, type) 匹配后删除；找不到的记录跳过
    async fn delete_records(&self, zone: &str, records: &[DnsRecord]) -> BatchResult;
}
