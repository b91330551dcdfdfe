//! 外部APIとのインターフェース
//!
//! 保存・取得の実体（HTTP、DBなど）はこのトレイトの実装側に任せる。
//! - JsonDirService: JSONファイルのディレクトリを使う実装（CLI用）
//! - CachedLookups: ステータス種別マスタをTTL付きでキャッシュするラッパー

pub mod cache;
pub mod json_dir;

pub use cache::CachedLookups;
pub use json_dir::JsonDirService;

use crate::error::Result;
use crate::forms::{ReadingForm, ReconciliationForm};
use equip_reading_common::{
    EquipmentCategory, EquipmentKeys, InspectionRow, ResolvedStatus, StatusMetadata,
    StatusTypeLookup,
};

#[allow(async_fn_in_trait)]
pub trait EquipmentService {
    /// 点検値を保存（カテゴリごとのエンドポイント）
    async fn save_readings(
        &self,
        category: EquipmentCategory,
        keys: &EquipmentKeys,
        readings: &ReadingForm,
    ) -> Result<()>;

    /// 照合結果を保存
    async fn save_reconciliation(
        &self,
        keys: &EquipmentKeys,
        reconciliation: &ReconciliationForm,
    ) -> Result<()>;

    /// ジョブサマリーレポートの該当行を取得
    async fn get_job_summary_row(
        &self,
        keys: &EquipmentKeys,
        category: EquipmentCategory,
    ) -> Result<InspectionRow>;

    /// カテゴリのステータス種別マスタを取得
    async fn get_status_type_lookup(&self, category: EquipmentCategory)
        -> Result<StatusTypeLookup>;

    /// 最終ステータスを保存
    async fn save_status(
        &self,
        keys: &EquipmentKeys,
        status: ResolvedStatus,
        notes: &str,
        metadata: &StatusMetadata,
    ) -> Result<()>;
}

impl<T: EquipmentService> EquipmentService for &T {
    async fn save_readings(
        &self,
        category: EquipmentCategory,
        keys: &EquipmentKeys,
        readings: &ReadingForm,
    ) -> Result<()> {
        (**self).save_readings(category, keys, readings).await
    }

    async fn save_reconciliation(
        &self,
        keys: &EquipmentKeys,
        reconciliation: &ReconciliationForm,
    ) -> Result<()> {
        (**self).save_reconciliation(keys, reconciliation).await
    }

    async fn get_job_summary_row(
        &self,
        keys: &EquipmentKeys,
        category: EquipmentCategory,
    ) -> Result<InspectionRow> {
        (**self).get_job_summary_row(keys, category).await
    }

    async fn get_status_type_lookup(
        &self,
        category: EquipmentCategory,
    ) -> Result<StatusTypeLookup> {
        (**self).get_status_type_lookup(category).await
    }

    async fn save_status(
        &self,
        keys: &EquipmentKeys,
        status: ResolvedStatus,
        notes: &str,
        metadata: &StatusMetadata,
    ) -> Result<()> {
        (**self).save_status(keys, status, notes, metadata).await
    }
}
