//! 日付コードの正規化
//!
//! ステータス更新時に送る月名・年（例: "March", "2024"）を求める。
//! 日付コードは日付文字列、または（年, 月名）の組から決まる。
//! 不正な値・0年・1900年（SQLのNULL日付）は空として扱う。

use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 有効とみなす年の範囲
const MIN_YEAR: i32 = 1901;
const MAX_YEAR: i32 = 9999;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];

/// 日付コードの入力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateCode {
    /// 日付文字列
    Date { date: String },
    /// 年と月名（または月番号）
    YearMonth {
        #[serde(deserialize_with = "string_or_number")]
        year: String,
        #[serde(deserialize_with = "string_or_number")]
        month: String,
    },
}

impl Default for DateCode {
    fn default() -> Self {
        DateCode::Date {
            date: String::new(),
        }
    }
}

/// ステータス更新に付与する月・年
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMetadata {
    pub month: String,
    pub year: String,
}

impl StatusMetadata {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_empty() && self.year.is_empty()
    }

    pub fn from_date_code(code: &DateCode) -> Self {
        match code {
            DateCode::Date { date } => Self::from_date_str(date),
            DateCode::YearMonth { year, month } => Self::from_year_month(year, month),
        }
    }

    /// 日付文字列から求める
    pub fn from_date_str(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::empty();
        }

        match parse_date(raw).or_else(|| parse_month_year_text(raw)) {
            Some((year, month)) => Self::build(year, month),
            None => Self::empty(),
        }
    }

    /// 年と月名（または月番号）から求める
    pub fn from_year_month(year: &str, month: &str) -> Self {
        let year = match year.trim().parse::<i32>() {
            Ok(y) => y,
            Err(_) => return Self::empty(),
        };
        match parse_month(month) {
            Some(month) => Self::build(year, month),
            None => Self::empty(),
        }
    }

    fn build(year: i32, month: Month) -> Self {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Self::empty();
        }
        Self {
            month: month.name().to_string(),
            year: format!("{:04}", year),
        }
    }
}

fn parse_date(raw: &str) -> Option<(i32, Month)> {
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })?;

    let month = Month::try_from(date.month() as u8).ok()?;
    Some((date.year(), month))
}

/// "March 2024" / "Mar-2024" / "03/2024" 形式
fn parse_month_year_text(raw: &str) -> Option<(i32, Month)> {
    lazy_static! {
        static ref NAME_YEAR_RE: Regex = Regex::new(r"^([A-Za-z]+)[\s\-/,]+(\d{4})$").unwrap();
        static ref NUMBER_YEAR_RE: Regex = Regex::new(r"^(\d{1,2})[/\-](\d{4})$").unwrap();
    }

    let caps = NAME_YEAR_RE
        .captures(raw)
        .or_else(|| NUMBER_YEAR_RE.captures(raw))?;
    let month = parse_month(&caps[1])?;
    let year = caps[2].parse::<i32>().ok()?;
    Some((year, month))
}

/// 月名（英語・略称可、大文字小文字無視）または 1-12 の月番号
fn parse_month(raw: &str) -> Option<Month> {
    let raw = raw.trim();
    if let Ok(number) = raw.parse::<u8>() {
        return Month::try_from(number).ok();
    }
    raw.parse::<Month>().ok()
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
