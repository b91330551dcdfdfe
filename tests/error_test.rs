//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use equip_reading::error::EquipError;
use equip_reading::orchestrator::ValidationIssue;
use equip_reading_common::ResolvedStatus;

/// EquipErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        EquipError::Config("テスト設定エラー".to_string()),
        EquipError::Service("接続失敗".to_string()),
        EquipError::NotFound("summary/ATS/1_2.json".to_string()),
        EquipError::Validation(vec![ValidationIssue::NotVerified]),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 入力エラーは全指摘を含む
#[test]
fn test_validation_message_lists_issues() {
    let err = EquipError::Validation(vec![
        ValidationIssue::MissingStatusNotes {
            status: ResolvedStatus::CriticalDeficiency,
        },
        ValidationIssue::NotVerified,
    ]);
    let display = format!("{}", err);

    assert!(display.contains("CriticalDeficiency"));
    assert!(display.contains("照合"));
    assert!(display.contains(" / "));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = EquipError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: EquipError = io_err.into();

    assert!(matches!(err, EquipError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: EquipError = json_err.into();

    assert!(matches!(err, EquipError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = equip_reading_common::Error::Parse("summary report returned no rows".to_string());
    let err: EquipError = common_err.into();

    assert!(matches!(err, EquipError::Common(_)));
    let display = format!("{}", err);
    assert!(display.contains("no rows"));
}
