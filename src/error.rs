use crate::orchestrator::ValidationIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EquipError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("API呼び出しエラー: {0}")]
    Service(String),

    #[error("データが見つかりません: {0}")]
    NotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] equip_reading_common::Error),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(" / ")
}

pub type Result<T> = std::result::Result<T, EquipError>;
