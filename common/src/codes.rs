//! 点検値コード
//!
//! サマリーレポートやフォームから届く生の値（"Y", "N", "F", true, 12 など）を
//! 受け取った時点で `ReadingCode` に変換する。
//! 以降のロジックは文字列ではなくこの列挙型で分岐する。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// 点検フィールドの値
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ReadingCode {
    /// "Y" — 要対応（Action系フィールド）
    Yes,
    /// "YS" — 要対応（一部カテゴリのAction系フィールド）
    YesSpecial,
    /// "N" — 不良
    No,
    /// "F" — Fail
    Fail,
    /// "P" — Pass
    Pass,
    /// "True" / JSON true
    True,
    /// "W" — 警告
    Warning,
    /// "12" — 旧システムの不良コード
    Twelve,
    /// null / 空文字 / 未入力
    #[default]
    Empty,
    /// 上記以外の値（比較対象外）
    Other(String),
}

impl ReadingCode {
    /// 文字列からコードへ変換
    ///
    /// 前後の空白は無視する（CHAR列のパディング対策）。
    /// 完全一致より意図的に広く、`"N "` も `No` として該当扱いになる。
    /// 大文字・小文字は区別する。
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" => ReadingCode::Empty,
            "Y" => ReadingCode::Yes,
            "YS" => ReadingCode::YesSpecial,
            "N" => ReadingCode::No,
            "F" => ReadingCode::Fail,
            "P" => ReadingCode::Pass,
            "True" => ReadingCode::True,
            "W" => ReadingCode::Warning,
            "12" => ReadingCode::Twelve,
            other => ReadingCode::Other(other.to_string()),
        }
    }

    /// JSON値からコードへ変換
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ReadingCode::Empty,
            Value::Bool(true) => ReadingCode::True,
            Value::Bool(false) => ReadingCode::Other("False".to_string()),
            Value::String(s) => Self::from_raw(s),
            Value::Number(n) => Self::from_raw(&number_text(n)),
            // 配列・オブジェクトはフィールド値として扱わない
            Value::Array(_) | Value::Object(_) => ReadingCode::Empty,
        }
    }

    /// 元のコード文字列
    pub fn as_code(&self) -> &str {
        match self {
            ReadingCode::Yes => "Y",
            ReadingCode::YesSpecial => "YS",
            ReadingCode::No => "N",
            ReadingCode::Fail => "F",
            ReadingCode::Pass => "P",
            ReadingCode::True => "True",
            ReadingCode::Warning => "W",
            ReadingCode::Twelve => "12",
            ReadingCode::Empty => "",
            ReadingCode::Other(s) => s,
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, ReadingCode::Fail)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ReadingCode::Empty)
    }
}

impl From<&str> for ReadingCode {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl std::fmt::Display for ReadingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl Serialize for ReadingCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

impl<'de> Deserialize<'de> for ReadingCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// 数値の文字列表現（`12.0` のような整数値の浮動小数は `12` にそろえる）
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
