//! GNAME DnsProvider trait 实现

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BatchError, BatchResult, ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::reconcile::{MatchOutcome, find_match};
use crate::traits::DnsProvider;
use crate::types::DnsRecord;

use super::{
    DEFAULT_TTL_SECS, ENDPOINT_ADD, ENDPOINT_DELETE, ENDPOINT_EDIT, ENDPOINT_LIST, GnameProvider,
    GnameRecord, PROVIDER_NAME, Params, RecordId,
};

impl GnameProvider {
    /// 厂商 TTL 字符串 -> 秒；缺失、非数字或 0 时取默认 600
    pub(crate) fn parse_ttl(ttl: Option<&str>) -> Duration {
        let secs = ttl
            .and_then(|t| t.trim().parse::<u64>().ok())
            .filter(|&t| t > 0)
            .unwrap_or(DEFAULT_TTL_SECS);
        Duration::from_secs(secs)
    }

    /// 厂商记录 -> 通用记录（类型与值原样透传）
    pub(crate) fn to_dns_record(record: GnameRecord) -> DnsRecord {
        let ttl = Self::parse_ttl(record.ttl.as_deref());
        let priority = record
            .mx
            .as_deref()
            .and_then(|mx| mx.trim().parse::<u16>().ok())
            .filter(|&mx| mx > 0);

        DnsRecord {
            id: Some(record.id).filter(|id| !id.is_empty()),
            name: record.zjt,
            record_type: record.lx,
            value: record.jxz,
            ttl,
            priority,
        }
    }

    /// 通用记录 -> add/edit 请求参数
    pub(crate) fn record_params(zone: &str, record: &DnsRecord) -> Params {
        let mut params = Params::new();
        params.insert("ym".to_string(), zone.to_string());
        params.insert("lx".to_string(), record.record_type.clone());
        params.insert("zj".to_string(), record.name.clone());
        params.insert("jlz".to_string(), record.value.clone());
        params.insert("ttl".to_string(), record.ttl.as_secs().to_string());
        if let Some(mx) = record.priority {
            params.insert("mx".to_string(), mx.to_string());
        }
        params
    }

    /// 列出 zone（已规范化）下的全部记录
    async fn list_zone(&self, zone: &str) -> Result<Vec<DnsRecord>> {
        let mut params = Params::new();
        params.insert("ym".to_string(), zone.to_string());

        let response = self
            .request::<Vec<GnameRecord>>(ENDPOINT_LIST, params)
            .await?;

        log::debug!(
            "[{PROVIDER_NAME}] {zone}: count={:?} page={:?} pagesize={:?}",
            response.count,
            response.page,
            response.page_size
        );

        let records = response.data.unwrap_or_default();
        if listing_truncated(response.count, records.len()) {
            log::warn!(
                "[{PROVIDER_NAME}] {zone}: listing returned {} of {:?} records, matching may miss some",
                records.len(),
                response.count
            );
        }

        Ok(records.into_iter().map(Self::to_dns_record).collect())
    }

    /// 新建单条记录，返回带新 ID 的记录
    async fn add_record(&self, zone: &str, record: &DnsRecord) -> Result<DnsRecord> {
        let response = self
            .request::<RecordId>(ENDPOINT_ADD, Self::record_params(zone, record))
            .await?;

        let mut created = record.clone();
        created.id = response.data.map(|id| id.0).filter(|id| !id.is_empty());
        if created.id.is_none() {
            log::warn!(
                "[{PROVIDER_NAME}] add '{}' ({}) succeeded without a record id",
                record.name,
                record.record_type
            );
        }
        Ok(created)
    }

    /// 按厂商 ID 修改记录，返回修改后的记录（值取自 `record`）
    async fn edit_record(&self, zone: &str, id: &str, record: &DnsRecord) -> Result<DnsRecord> {
        let mut params = Self::record_params(zone, record);
        params.insert("jxid".to_string(), id.to_string());

        self.request::<serde_json::Value>(ENDPOINT_EDIT, params).await?;

        Ok(record.clone().with_id(id))
    }

    /// 按厂商 ID 删除记录
    async fn remove_record(&self, zone: &str, id: &str) -> Result<()> {
        let mut params = Params::new();
        params.insert("ym".to_string(), zone.to_string());
        params.insert("jxid".to_string(), id.to_string());

        self.request::<serde_json::Value>(ENDPOINT_DELETE, params).await?;

        Ok(())
    }

    /// set 的单条处理：`Ok(None)` 表示跳过
    ///
    /// 成功后同步更新 `listed`，同一批里后面的记录能看到前面的结果。
    async fn set_one(
        &self,
        zone: &str,
        listed: &mut Vec<DnsRecord>,
        record: &DnsRecord,
    ) -> Result<Option<DnsRecord>> {
        let matched_id = match find_match(listed, record, self.match_policy, PROVIDER_NAME)? {
            MatchOutcome::Missing => None,
            MatchOutcome::Unresolved(_) => {
                log::warn!(
                    "[{PROVIDER_NAME}] skip set '{}' ({}): listed record has no id",
                    record.name,
                    record.record_type
                );
                return Ok(None);
            }
            MatchOutcome::Found { id, .. } => Some(id.to_string()),
        };

        match matched_id {
            None => {
                let created = self.add_record(zone, record).await?;
                listed.push(created.clone());
                Ok(Some(created))
            }
            Some(id) => {
                let edited = self.edit_record(zone, &id, record).await?;
                if let Some(slot) = listed
                    .iter_mut()
                    .find(|r| r.id.as_deref() == Some(id.as_str()))
                {
                    *slot = edited.clone();
                }
                Ok(Some(edited))
            }
        }
    }

    /// delete 的单条处理：`Ok(None)` 表示没有可删的记录
    ///
    /// 删除成功后把该记录移出 `listed`。
    async fn delete_one(
        &self,
        zone: &str,
        listed: &mut Vec<DnsRecord>,
        record: &DnsRecord,
    ) -> Result<Option<DnsRecord>> {
        let (id, existing) = match find_match(listed, record, self.match_policy, PROVIDER_NAME)? {
            MatchOutcome::Missing => {
                log::debug!(
                    "[{PROVIDER_NAME}] nothing to delete for '{}' ({})",
                    record.name,
                    record.record_type
                );
                return Ok(None);
            }
            MatchOutcome::Unresolved(_) => {
                log::warn!(
                    "[{PROVIDER_NAME}] skip delete '{}' ({}): listed record has no id",
                    record.name,
                    record.record_type
                );
                return Ok(None);
            }
            MatchOutcome::Found {
                id,
                record: existing,
            } => (id.to_string(), existing.clone()),
        };

        self.remove_record(zone, &id).await?;
        listed.retain(|r| r.id.as_deref() != Some(id.as_str()));
        Ok(Some(existing))
    }
}

/// 列表返回条数少于 `count` 时为 true
fn listing_truncated(count: Option<i64>, returned: usize) -> bool {
    count
        .and_then(|c| usize::try_from(c).ok())
        .is_some_and(|c| c > returned)
}

#[async_trait]
impl DnsProvider for GnameProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn validate_credentials(&self, zone: &str) -> Result<bool> {
        match self.get_records(zone).await {
            Ok(_) => Ok(true),
            Err(BatchError {
                error: e @ (ProviderError::Api { .. } | ProviderError::InvalidCredentials { .. }),
                ..
            }) => {
                log::warn!("凭证验证失败: {e}");
                Ok(false)
            }
            Err(e) => Err(e.error),
        }
    }

    async fn get_records(&self, zone: &str) -> BatchResult {
        let zone = normalize_domain_name(zone);
        self.list_zone(&zone)
            .await
            .map_err(|e| BatchError::zone_scoped(&zone, e))
    }

    async fn append_records(&self, zone: &str, records: &[DnsRecord]) -> BatchResult {
        let zone = normalize_domain_name(zone);
        let mut appended = Vec::with_capacity(records.len());

        for record in records {
            match self.add_record(&zone, record).await {
                Ok(created) => appended.push(created),
                Err(e) => return Err(BatchError::record_scoped(&zone, record, appended, e)),
            }
        }

        Ok(appended)
    }

    async fn set_records(&self, zone: &str, records: &[DnsRecord]) -> BatchResult {
        let zone = normalize_domain_name(zone);
        let mut listed = self
            .list_zone(&zone)
            .await
            .map_err(|e| BatchError::zone_scoped(&zone, e))?;

        let mut updated = Vec::with_capacity(records.len());
        for record in records {
            match self.set_one(&zone, &mut listed, record).await {
                Ok(Some(applied)) => updated.push(applied),
                Ok(None) => {}
                Err(e) => return Err(BatchError::record_scoped(&zone, record, updated, e)),
            }
        }

        Ok(updated)
    }

    async fn delete_records(&self, zone: &str, records: &[DnsRecord]) -> BatchResult {
        let zone = normalize_domain_name(zone);
        let mut listed = self
            .list_zone(&zone)
            .await
            .map_err(|e| BatchError::zone_scoped(&zone, e))?;

        let mut deleted = Vec::new();
        for record in records {
            match self.delete_one(&zone, &mut listed, record).await {
                Ok(Some(removed)) => deleted.push(removed),
                Ok(None) => {}
                Err(e) => return Err(BatchError::record_scoped(&zone, record, deleted, e)),
            }
        }

        Ok(deleted)
    }
}
