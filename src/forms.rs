//! 点検画面のフォーム値
//!
//! - ReadingForm: 点検値フォーム（pass/fail項目、コメント、ステータス）
//! - ReconciliationForm: 照合フォーム（型式・シリアル・数量の確認）
//! - SaveRequest: 1回の保存操作に必要な値一式

use equip_reading_common::{
    DateCode, EquipmentCategory, EquipmentKeys, InspectionRow, ResolvedStatus,
};
use serde::{Deserialize, Serialize};

/// 点検値フォーム
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingForm {
    /// 点検項目（フィールド名 → 値）
    pub fields: InspectionRow,

    pub comments: String,

    /// 作業者が選択したステータス
    pub status: ResolvedStatus,

    pub status_notes: String,

    /// 月・年の算出元
    pub date_code: DateCode,
}

impl ReadingForm {
    /// pass/fail項目に "F" があるか
    pub fn has_failed_check(&self) -> bool {
        self.fields.has_fail()
    }

    /// "F" の項目名
    pub fn failed_checks(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, code)| code.is_fail())
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// 照合フォーム
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconciliationForm {
    pub model: String,
    pub serial_no: String,
    pub kva: String,
    pub quantity: u32,
    pub notes: String,

    /// 現物と記録の一致を確認済みか
    pub verified: bool,
}

/// 保存リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub category: EquipmentCategory,
    pub keys: EquipmentKeys,

    #[serde(default)]
    pub readings: ReadingForm,

    #[serde(default)]
    pub reconciliation: ReconciliationForm,

    /// 下書き保存（入力チェック・ステータス判定をスキップ）
    #[serde(default)]
    pub draft: bool,
}

impl SaveRequest {
    pub fn new(category: EquipmentCategory, keys: EquipmentKeys) -> Self {
        Self {
            category,
            keys,
            readings: ReadingForm::default(),
            reconciliation: ReconciliationForm::default(),
            draft: false,
        }
    }
}
