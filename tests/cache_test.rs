//! マスタキャッシュ機能テスト
//!
//! ステータス種別マスタのキャッシュ動作を検証

use equip_reading::error::{EquipError, Result};
use equip_reading::forms::{ReadingForm, ReconciliationForm};
use equip_reading::service::{CachedLookups, EquipmentService};
use equip_reading_common::{
    EquipmentCategory, EquipmentKeys, InspectionRow, ResolvedStatus, StatusMetadata, StatusType,
    StatusTypeLookup,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// マスタ取得回数を数えるモック
#[derive(Default)]
struct CountingService {
    lookup_calls: AtomicUsize,
    status_calls: AtomicUsize,
    fail_lookup: AtomicBool,
}

impl EquipmentService for CountingService {
    async fn save_readings(
        &self,
        _category: EquipmentCategory,
        _keys: &EquipmentKeys,
        _readings: &ReadingForm,
    ) -> Result<()> {
        Ok(())
    }

    async fn save_reconciliation(
        &self,
        _keys: &EquipmentKeys,
        _reconciliation: &ReconciliationForm,
    ) -> Result<()> {
        Ok(())
    }

    async fn get_job_summary_row(
        &self,
        _keys: &EquipmentKeys,
        _category: EquipmentCategory,
    ) -> Result<InspectionRow> {
        Ok(InspectionRow::new())
    }

    async fn get_status_type_lookup(
        &self,
        category: EquipmentCategory,
    ) -> Result<StatusTypeLookup> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(EquipError::Service("lookup unavailable".into()));
        }
        let mut lookup = StatusTypeLookup::new();
        lookup.insert(format!("{}Action", category.code()), StatusType::CriticalDeficiency);
        Ok(lookup)
    }

    async fn save_status(
        &self,
        _keys: &EquipmentKeys,
        _status: ResolvedStatus,
        _notes: &str,
        _metadata: &StatusMetadata,
    ) -> Result<()> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn lookup_calls(cache: &CachedLookups<CountingService>) -> usize {
    cache.inner().lookup_calls.load(Ordering::SeqCst)
}

/// 空のキャッシュ
#[tokio::test]
async fn test_cache_starts_empty() {
    let cache = CachedLookups::new(CountingService::default(), Duration::from_secs(60));
    assert_eq!(cache.len().await, 0);
    assert!(cache.is_empty().await);
}

/// TTL内は再取得しない
#[tokio::test]
async fn test_cache_hit_within_ttl() {
    let cache = CachedLookups::new(CountingService::default(), Duration::from_secs(60));

    let first = cache.get_status_type_lookup(EquipmentCategory::Ats).await.unwrap();
    let second = cache.get_status_type_lookup(EquipmentCategory::Ats).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.get("ATSAction"), Some(StatusType::CriticalDeficiency));
    assert_eq!(lookup_calls(&cache), 1);
    assert_eq!(cache.len().await, 1);
}

/// カテゴリごとに別エントリ
#[tokio::test]
async fn test_cache_per_category() {
    let cache = CachedLookups::new(CountingService::default(), Duration::from_secs(60));

    cache.get_status_type_lookup(EquipmentCategory::Ats).await.unwrap();
    let scc = cache.get_status_type_lookup(EquipmentCategory::Scc).await.unwrap();
    cache.get_status_type_lookup(EquipmentCategory::Scc).await.unwrap();

    assert_eq!(scc.get("SCCAction"), Some(StatusType::CriticalDeficiency));
    assert_eq!(lookup_calls(&cache), 2);
    assert_eq!(cache.len().await, 2);
}

/// TTL 0 はキャッシュ無効
#[tokio::test]
async fn test_zero_ttl_disables_cache() {
    let cache = CachedLookups::new(CountingService::default(), Duration::ZERO);

    cache.get_status_type_lookup(EquipmentCategory::Generator).await.unwrap();
    cache.get_status_type_lookup(EquipmentCategory::Generator).await.unwrap();

    assert_eq!(lookup_calls(&cache), 2);
    assert!(cache.is_empty().await);
}

/// 破棄後は再取得
#[tokio::test]
async fn test_invalidate_and_clear() {
    let cache = CachedLookups::new(CountingService::default(), Duration::from_secs(60));

    cache.get_status_type_lookup(EquipmentCategory::Ats).await.unwrap();
    cache.get_status_type_lookup(EquipmentCategory::Other).await.unwrap();

    assert!(cache.invalidate(EquipmentCategory::Ats).await);
    assert!(!cache.invalidate(EquipmentCategory::Ats).await);
    cache.get_status_type_lookup(EquipmentCategory::Ats).await.unwrap();
    assert_eq!(lookup_calls(&cache), 3);

    cache.clear().await;
    assert!(cache.is_empty().await);
}

/// 取得失敗はキャッシュしない
#[tokio::test]
async fn test_failures_are_not_cached() {
    let cache = CachedLookups::new(CountingService::default(), Duration::from_secs(60));
    cache.inner().fail_lookup.store(true, Ordering::SeqCst);

    assert!(cache.get_status_type_lookup(EquipmentCategory::Ats).await.is_err());
    assert!(cache.is_empty().await);

    cache.inner().fail_lookup.store(false, Ordering::SeqCst);
    assert!(cache.get_status_type_lookup(EquipmentCategory::Ats).await.is_ok());
    assert_eq!(lookup_calls(&cache), 2);
}

/// マスタ以外の操作はそのまま委譲
#[tokio::test]
async fn test_other_operations_delegate() {
    let cache = CachedLookups::new(CountingService::default(), Duration::from_secs(60));
    let keys = EquipmentKeys::new("1", "2");

    cache
        .save_status(&keys, ResolvedStatus::Online, "", &StatusMetadata::empty())
        .await
        .unwrap();
    cache
        .save_status(&keys, ResolvedStatus::Online, "", &StatusMetadata::empty())
        .await
        .unwrap();

    assert_eq!(cache.inner().status_calls.load(Ordering::SeqCst), 2);
}
