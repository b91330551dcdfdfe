//! JSONディレクトリを外部APIの代わりに使う実装
//!
//! ```text
//! <root>/
//!   summary/<CATEGORY>/<key>.json     サマリーレポートの行
//!   status_types/<CATEGORY>.json      ステータス種別マスタ
//!   saved/readings/<CATEGORY>_<key>.json
//!   saved/reconciliation/<key>.json
//!   saved/status/<key>.json
//! ```
//!
//! `<key>` は `<callNbr>_<equipId>`、機器番号があれば `_<equipNo>` を付ける。
//! 英数字と `-` 以外のバイトは `%XX` に置き換えるため、異なるキーが同じファイル名にならない。

use super::EquipmentService;
use crate::error::{EquipError, Result};
use crate::forms::{ReadingForm, ReconciliationForm};
use equip_reading_common::{
    EquipmentCategory, EquipmentKeys, InspectionRow, ResolvedStatus, StatusMetadata,
    StatusTypeLookup,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

const SUMMARY_DIR: &str = "summary";
const STATUS_TYPES_DIR: &str = "status_types";
const SAVED_DIR: &str = "saved";

#[derive(Debug, Clone)]
pub struct JsonDirService {
    root: PathBuf,
}

/// 保存ファイルの共通ヘッダ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedDocument<'a, T: Serialize> {
    keys: &'a EquipmentKeys,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<EquipmentCategory>,
    saved_at: String,
    data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusUpdate<'a> {
    status: ResolvedStatus,
    notes: &'a str,
    month: &'a str,
    year: &'a str,
}

impl JsonDirService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn summary_path(&self, keys: &EquipmentKeys, category: EquipmentCategory) -> PathBuf {
        self.root
            .join(SUMMARY_DIR)
            .join(category.code())
            .join(format!("{}.json", key_stem(keys)))
    }

    pub fn status_types_path(&self, category: EquipmentCategory) -> PathBuf {
        self.root
            .join(STATUS_TYPES_DIR)
            .join(format!("{}.json", category.code()))
    }

    pub fn readings_path(&self, keys: &EquipmentKeys, category: EquipmentCategory) -> PathBuf {
        self.root
            .join(SAVED_DIR)
            .join("readings")
            .join(format!("{}_{}.json", category.code(), key_stem(keys)))
    }

    pub fn reconciliation_path(&self, keys: &EquipmentKeys) -> PathBuf {
        self.root
            .join(SAVED_DIR)
            .join("reconciliation")
            .join(format!("{}.json", key_stem(keys)))
    }

    pub fn status_path(&self, keys: &EquipmentKeys) -> PathBuf {
        self.root
            .join(SAVED_DIR)
            .join("status")
            .join(format!("{}.json", key_stem(keys)))
    }

    async fn read_json(&self, path: &Path) -> Result<serde_json::Value> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EquipError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(value)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

impl EquipmentService for JsonDirService {
    async fn save_readings(
        &self,
        category: EquipmentCategory,
        keys: &EquipmentKeys,
        readings: &ReadingForm,
    ) -> Result<()> {
        let doc = SavedDocument {
            keys,
            category: Some(category),
            saved_at: now(),
            data: readings,
        };
        self.write_json(&self.readings_path(keys, category), &doc).await
    }

    async fn save_reconciliation(
        &self,
        keys: &EquipmentKeys,
        reconciliation: &ReconciliationForm,
    ) -> Result<()> {
        let doc = SavedDocument {
            keys,
            category: None,
            saved_at: now(),
            data: reconciliation,
        };
        self.write_json(&self.reconciliation_path(keys), &doc).await
    }

    async fn get_job_summary_row(
        &self,
        keys: &EquipmentKeys,
        category: EquipmentCategory,
    ) -> Result<InspectionRow> {
        let value = self.read_json(&self.summary_path(keys, category)).await?;
        Ok(InspectionRow::from_json_value(&value)?)
    }

    async fn get_status_type_lookup(
        &self,
        category: EquipmentCategory,
    ) -> Result<StatusTypeLookup> {
        let value = self.read_json(&self.status_types_path(category)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn save_status(
        &self,
        keys: &EquipmentKeys,
        status: ResolvedStatus,
        notes: &str,
        metadata: &StatusMetadata,
    ) -> Result<()> {
        let doc = SavedDocument {
            keys,
            category: None,
            saved_at: now(),
            data: StatusUpdate {
                status,
                notes,
                month: &metadata.month,
                year: &metadata.year,
            },
        };
        self.write_json(&self.status_path(keys), &doc).await
    }
}

fn now() -> String {
    chrono::Local::now().to_rfc3339()
}

/// 機器キーからファイル名の幹を作る
fn key_stem(keys: &EquipmentKeys) -> String {
    let mut stem = format!("{}_{}", escape(&keys.call_nbr), escape(&keys.equip_id));
    if !keys.equip_no.is_empty() {
        stem.push('_');
        stem.push_str(&escape(&keys.equip_no));
    }
    stem
}

/// 英数字と `-` 以外をパーセントエンコード（区切りの `_` も対象）
fn escape(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for byte in part.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_use_category_code() {
        let service = JsonDirService::new("/data");
        let keys = EquipmentKeys::new("100234", "77");

        assert_eq!(
            service.summary_path(&keys, EquipmentCategory::Rectifier),
            PathBuf::from("/data/summary/RECTIFIER/100234_77.json")
        );
        assert_eq!(
            service.status_types_path(EquipmentCategory::Other),
            PathBuf::from("/data/status_types/Other.json")
        );
        assert_eq!(
            service.readings_path(&keys, EquipmentCategory::Ats),
            PathBuf::from("/data/saved/readings/ATS_100234_77.json")
        );
    }

    #[test]
    fn test_key_stem_escapes() {
        let keys = EquipmentKeys::new("10/02 A", "../x");
        assert_eq!(key_stem(&keys), "10%2F02%20A_%2E%2E%2Fx");
    }

    #[test]
    fn test_key_stem_is_unambiguous() {
        let slash = key_stem(&EquipmentKeys::new("10/02", "7"));
        let underscore = key_stem(&EquipmentKeys::new("10_02", "7"));
        assert_ne!(slash, underscore);
        assert_eq!(underscore, "10%5F02_7");

        // 区切り位置がずれても衝突しない
        assert_ne!(
            key_stem(&EquipmentKeys::new("1_2", "3")),
            key_stem(&EquipmentKeys::new("1", "2_3"))
        );
    }

    #[test]
    fn test_equip_no_separates_files() {
        let service = JsonDirService::new("/data");
        let first = EquipmentKeys::new("100234", "77").with_equip_no("R1");
        let second = EquipmentKeys::new("100234", "77").with_equip_no("R2");

        assert_eq!(
            service.status_path(&first),
            PathBuf::from("/data/saved/status/100234_77_R1.json")
        );
        assert_ne!(service.status_path(&first), service.status_path(&second));
        assert_ne!(
            service.readings_path(&first, EquipmentCategory::Rectifier),
            service.readings_path(&second, EquipmentCategory::Rectifier)
        );
        assert_ne!(
            service.reconciliation_path(&first),
            service.reconciliation_path(&second)
        );
    }
}
