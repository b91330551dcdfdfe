//! 設備点検の型定義
//!
//! 各点検画面（ATS/SCC/整流器/発電機/その他）で共有される型:
//! - EquipmentCategory: 設備カテゴリ
//! - EquipmentKeys: 設備を特定するキー
//! - ResolvedStatus: 設備の総合ステータス
//! - StatusType / StatusTypeLookup: フィールドごとのステータス種別
//! - InspectionRow: サマリーレポートの1行（フィールド名 → 値）

use crate::codes::ReadingCode;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 設備カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentCategory {
    #[serde(rename = "ATS", alias = "ats")]
    Ats,
    #[serde(rename = "SCC", alias = "scc")]
    Scc,
    #[serde(rename = "RECTIFIER", alias = "Rectifier", alias = "rectifier")]
    Rectifier,
    #[serde(rename = "GENERATOR", alias = "Generator", alias = "generator")]
    Generator,
    #[serde(rename = "Other", alias = "OTHER", alias = "other")]
    Other,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 5] = [
        EquipmentCategory::Ats,
        EquipmentCategory::Scc,
        EquipmentCategory::Rectifier,
        EquipmentCategory::Generator,
        EquipmentCategory::Other,
    ];

    /// バックエンドに渡すカテゴリコード
    pub fn code(&self) -> &'static str {
        match self {
            EquipmentCategory::Ats => "ATS",
            EquipmentCategory::Scc => "SCC",
            EquipmentCategory::Rectifier => "RECTIFIER",
            EquipmentCategory::Generator => "GENERATOR",
            EquipmentCategory::Other => "Other",
        }
    }
}

impl std::str::FromStr for EquipmentCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EquipmentCategory::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown category: {}. Use ATS, SCC, RECTIFIER, GENERATOR, or Other", s)
            })
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 設備を特定するキー
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentKeys {
    pub call_nbr: String,
    pub equip_id: String,
    /// 設備番号（整流器の場合は整流器ID）
    #[serde(default, alias = "rectifierId")]
    pub equip_no: String,
}

impl EquipmentKeys {
    pub fn new(call_nbr: impl Into<String>, equip_id: impl Into<String>) -> Self {
        Self {
            call_nbr: call_nbr.into(),
            equip_id: equip_id.into(),
            equip_no: String::new(),
        }
    }

    pub fn with_equip_no(mut self, equip_no: impl Into<String>) -> Self {
        self.equip_no = equip_no.into();
        self
    }
}

impl std::fmt::Display for EquipmentKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.call_nbr, self.equip_id)?;
        if !self.equip_no.is_empty() {
            write!(f, " ({})", self.equip_no)?;
        }
        Ok(())
    }
}

/// 設備の総合ステータス
///
/// シリアライズ時は旧システムのコード文字列を使う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResolvedStatus {
    #[default]
    #[serde(rename = "Online", alias = "OnLine")]
    Online,
    #[serde(rename = "OnLine(MinorDeficiency)")]
    MinorDeficiency,
    #[serde(rename = "OnLine(MajorDeficiency)")]
    MajorDeficiency,
    ReplacementRecommended,
    ProactiveReplacement,
    CriticalDeficiency,
    Offline,
}

impl ResolvedStatus {
    pub const ALL: [ResolvedStatus; 7] = [
        ResolvedStatus::Online,
        ResolvedStatus::MinorDeficiency,
        ResolvedStatus::MajorDeficiency,
        ResolvedStatus::ReplacementRecommended,
        ResolvedStatus::ProactiveReplacement,
        ResolvedStatus::CriticalDeficiency,
        ResolvedStatus::Offline,
    ];

    /// 旧システムのステータスコード
    pub fn code(&self) -> &'static str {
        match self {
            ResolvedStatus::Online => "Online",
            ResolvedStatus::MinorDeficiency => "OnLine(MinorDeficiency)",
            ResolvedStatus::MajorDeficiency => "OnLine(MajorDeficiency)",
            ResolvedStatus::ReplacementRecommended => "ReplacementRecommended",
            ResolvedStatus::ProactiveReplacement => "ProactiveReplacement",
            ResolvedStatus::CriticalDeficiency => "CriticalDeficiency",
            ResolvedStatus::Offline => "Offline",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ResolvedStatus::Online)
    }
}

impl std::str::FromStr for ResolvedStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s == "OnLine" {
            return Ok(ResolvedStatus::Online);
        }
        ResolvedStatus::ALL
            .into_iter()
            .find(|st| st.code() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

impl std::fmt::Display for ResolvedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// フィールドごとのステータス種別（ステータス種別マスタの値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusType {
    CriticalDeficiency,
    MajorDeficiency,
    ReplacementRecommended,
    ProactiveReplacement,
    /// 未知の値はこれになる
    #[default]
    MinorDeficiency,
    None,
}

impl StatusType {
    pub fn code(&self) -> &'static str {
        match self {
            StatusType::CriticalDeficiency => "CriticalDeficiency",
            StatusType::MajorDeficiency => "OnLine(MajorDeficiency)",
            StatusType::ReplacementRecommended => "ReplacementRecommended",
            StatusType::ProactiveReplacement => "ProactiveReplacement",
            StatusType::MinorDeficiency => "OnLine(MinorDeficiency)",
            StatusType::None => "None",
        }
    }
}

impl From<&str> for StatusType {
    fn from(raw: &str) -> Self {
        // マスタの表記揺れ（空白あり/なし、OnLine()付き）を吸収
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.as_str() {
            "CriticalDeficiency" => StatusType::CriticalDeficiency,
            "OnLine(MajorDeficiency)" | "MajorDeficiency" => StatusType::MajorDeficiency,
            "ReplacementRecommended" => StatusType::ReplacementRecommended,
            "ProactiveReplacement" => StatusType::ProactiveReplacement,
            "None" => StatusType::None,
            _ => StatusType::MinorDeficiency,
        }
    }
}

impl Serialize for StatusType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for StatusType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // マスタの値が null の列もある
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(StatusType::MinorDeficiency, |r| StatusType::from(r.as_str())))
    }
}

/// ステータス種別マスタ（フィールド名 → ステータス種別）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusTypeLookup {
    entries: HashMap<String, StatusType>,
}

impl StatusTypeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<StatusType> {
        self.entries.get(field).copied()
    }

    pub fn insert(&mut self, field: impl Into<String>, status_type: StatusType) {
        self.entries.insert(field.into(), status_type);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, StatusType)> for StatusTypeLookup {
    fn from_iter<I: IntoIterator<Item = (K, StatusType)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// サマリーレポートの1行
///
/// フィールドの並び順はレポートの列順を保持する
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionRow {
    fields: Vec<(String, ReadingCode)>,
}

impl InspectionRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを追加（同名フィールドは位置を保ったまま上書き）
    pub fn insert(&mut self, field: impl Into<String>, code: impl Into<ReadingCode>) {
        let field = field.into();
        let code = code.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = code,
            None => self.fields.push((field, code)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&ReadingCode> {
        self.fields.iter().find(|(name, _)| name == field).map(|(_, code)| code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReadingCode)> {
        self.fields.iter().map(|(name, code)| (name.as_str(), code))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// いずれかのフィールドが "F" か
    pub fn has_fail(&self) -> bool {
        self.fields.iter().any(|(_, code)| code.is_fail())
    }

    /// JSONオブジェクトから変換
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        Self {
            fields: object
                .iter()
                .map(|(name, value)| (name.clone(), ReadingCode::from_json(value)))
                .collect(),
        }
    }

    /// JSON値から変換（オブジェクトまたは1件目のオブジェクトを含む配列）
    pub fn from_json_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self::from_json_object(object)),
            Value::Array(items) => match items.first() {
                Some(Value::Object(object)) => Ok(Self::from_json_object(object)),
                Some(_) => Err(Error::Parse("summary row must be a JSON object".into())),
                None => Err(Error::Parse("summary report returned no rows".into())),
            },
            _ => Err(Error::Parse("summary row must be a JSON object".into())),
        }
    }
}

impl<K: Into<String>, V: Into<ReadingCode>> FromIterator<(K, V)> for InspectionRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = InspectionRow::new();
        for (field, code) in iter {
            row.insert(field, code);
        }
        row
    }
}

impl Serialize for InspectionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, code) in &self.fields {
            map.serialize_entry(name, code)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InspectionRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_json_object(&object))
    }
}
