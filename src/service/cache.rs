//! ステータス種別マスタのキャッシュ
//!
//! カテゴリをキーにしてマスタをメモリ上に保持し、TTL内は再取得をスキップする。
//! 取得失敗はキャッシュしない。TTLが0ならキャッシュ無効。

use super::EquipmentService;
use crate::error::Result;
use crate::forms::{ReadingForm, ReconciliationForm};
use equip_reading_common::{
    EquipmentCategory, EquipmentKeys, InspectionRow, ResolvedStatus, StatusMetadata,
    StatusTypeLookup,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// キャッシュエントリ
#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    lookup: StatusTypeLookup,
}

/// マスタ取得をキャッシュするラッパー（他の操作はそのまま委譲）
pub struct CachedLookups<S> {
    inner: S,
    ttl: Duration,
    entries: Mutex<HashMap<EquipmentCategory, CacheEntry>>,
}

impl<S> CachedLookups<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// カテゴリのキャッシュを破棄
    pub async fn invalidate(&self, category: EquipmentCategory) -> bool {
        self.entries.lock().await.remove(&category).is_some()
    }

    /// 全キャッシュを破棄
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// キャッシュ件数（期限切れを含む）
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn cached(&self, category: EquipmentCategory) -> Option<StatusTypeLookup> {
        let entries = self.entries.lock().await;
        entries
            .get(&category)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.lookup.clone())
    }
}

impl<S: EquipmentService> EquipmentService for CachedLookups<S> {
    async fn save_readings(
        &self,
        category: EquipmentCategory,
        keys: &EquipmentKeys,
        readings: &ReadingForm,
    ) -> Result<()> {
        self.inner.save_readings(category, keys, readings).await
    }

    async fn save_reconciliation(
        &self,
        keys: &EquipmentKeys,
        reconciliation: &ReconciliationForm,
    ) -> Result<()> {
        self.inner.save_reconciliation(keys, reconciliation).await
    }

    async fn get_job_summary_row(
        &self,
        keys: &EquipmentKeys,
        category: EquipmentCategory,
    ) -> Result<InspectionRow> {
        self.inner.get_job_summary_row(keys, category).await
    }

    async fn get_status_type_lookup(
        &self,
        category: EquipmentCategory,
    ) -> Result<StatusTypeLookup> {
        if let Some(lookup) = self.cached(category).await {
            debug!(%category, "status type lookup served from cache");
            return Ok(lookup);
        }

        let lookup = self.inner.get_status_type_lookup(category).await?;
        if !self.ttl.is_zero() {
            self.entries.lock().await.insert(
                category,
                CacheEntry {
                    fetched_at: Instant::now(),
                    lookup: lookup.clone(),
                },
            );
        }
        Ok(lookup)
    }

    async fn save_status(
        &self,
        keys: &EquipmentKeys,
        status: ResolvedStatus,
        notes: &str,
        metadata: &StatusMetadata,
    ) -> Result<()> {
        self.inner.save_status(keys, status, notes, metadata).await
    }
}
