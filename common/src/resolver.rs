//! 総合ステータス判定
//!
//! サマリーレポートの1行とステータス種別マスタから、設備の総合ステータスを求める。
//!
//! ## 判定ルール
//! 1. 初期値は `Online`
//! 2. フィールド名に "Action" を含む場合は "Y"（カテゴリによっては "YS"）で該当
//! 3. それ以外は "N" / "F" / "True" / "W" / "12" で該当
//! 4. 該当したら最低でも `OnLine(MinorDeficiency)` に引き上げ、マスタを参照:
//!    - CriticalDeficiency → 即座に `CriticalDeficiency` を返す
//!    - MajorDeficiency / ReplacementRecommended / ProactiveReplacement → 上書き（後勝ち）
//!    - 登録なし → そのまま

use crate::codes::ReadingCode;
use crate::types::{EquipmentCategory, InspectionRow, ResolvedStatus, StatusType, StatusTypeLookup};

/// Action系フィールドの判定に使う部分文字列（大文字小文字を区別）
///
/// 名前に偶然 "Action" を含むだけのフィールドも対象になる点に注意
pub const ACTION_MARKER: &str = "Action";

/// 全カテゴリ共通の除外フィールド（識別子列）
pub const COMMON_EXCLUDED_FIELDS: &[&str] = &["CallNbr", "EquipId", "EquipNo"];

/// 判定オプション
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    /// 判定対象外のフィールド
    pub excluded_fields: Vec<String>,
    /// Action系フィールドで該当とみなす値
    pub action_codes: Vec<ReadingCode>,
}

impl ResolveOptions {
    /// カテゴリごとの既定値
    pub fn for_category(category: EquipmentCategory) -> Self {
        let mut excluded_fields: Vec<String> =
            COMMON_EXCLUDED_FIELDS.iter().map(|f| f.to_string()).collect();
        let mut action_codes = vec![ReadingCode::Yes];

        match category {
            EquipmentCategory::Rectifier => excluded_fields.push("RectifierId".into()),
            EquipmentCategory::Generator => {
                excluded_fields.push("GenId".into());
                action_codes.push(ReadingCode::YesSpecial);
            }
            EquipmentCategory::Other => action_codes.push(ReadingCode::YesSpecial),
            EquipmentCategory::Ats | EquipmentCategory::Scc => {}
        }

        Self {
            excluded_fields,
            action_codes,
        }
    }

    /// 除外フィールドを追加
    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.excluded_fields.push(field.into());
        self
    }

    fn is_excluded(&self, field: &str) -> bool {
        self.excluded_fields.iter().any(|f| f == field)
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::for_category(EquipmentCategory::Ats)
    }
}

/// フィールドが不良判定の引き金になるか
pub fn is_triggered(field: &str, code: &ReadingCode, options: &ResolveOptions) -> bool {
    if field.contains(ACTION_MARKER) {
        options.action_codes.contains(code)
    } else {
        matches!(
            code,
            ReadingCode::No
                | ReadingCode::Fail
                | ReadingCode::True
                | ReadingCode::Warning
                | ReadingCode::Twelve
        )
    }
}

/// 総合ステータスを判定
///
/// 副作用なし。不正な行でも失敗せず、必ずいずれかのステータスを返す。
pub fn resolve(
    row: &InspectionRow,
    lookup: &StatusTypeLookup,
    options: &ResolveOptions,
) -> ResolvedStatus {
    let mut result = ResolvedStatus::Online;

    for (field, code) in row.iter() {
        if options.is_excluded(field) || !is_triggered(field, code, options) {
            continue;
        }

        if result == ResolvedStatus::Online {
            result = ResolvedStatus::MinorDeficiency;
        }

        match lookup.get(field) {
            Some(StatusType::CriticalDeficiency) => return ResolvedStatus::CriticalDeficiency,
            Some(StatusType::MajorDeficiency) => result = ResolvedStatus::MajorDeficiency,
            Some(StatusType::ReplacementRecommended) => {
                result = ResolvedStatus::ReplacementRecommended
            }
            Some(StatusType::ProactiveReplacement) => result = ResolvedStatus::ProactiveReplacement,
            Some(StatusType::MinorDeficiency) | Some(StatusType::None) | None => {}
        }
    }

    result
}
