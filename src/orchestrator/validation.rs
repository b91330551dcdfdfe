//! 保存前の入力チェック
//!
//! API呼び出しの前に実行する。下書き保存ではスキップする。

use crate::forms::SaveRequest;
use equip_reading_common::ResolvedStatus;
use serde::Serialize;

/// 入力チェックの指摘事項
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationIssue {
    /// Online以外のステータスにはメモが必要
    MissingStatusNotes { status: ResolvedStatus },
    /// 照合が未確認
    NotVerified,
    /// "F" の項目があるのにコメントが空
    MissingComments { failed_checks: Vec<String> },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MissingStatusNotes { status } => {
                write!(f, "ステータス「{}」にはメモを入力してください", status)
            }
            ValidationIssue::NotVerified => write!(f, "照合の確認が完了していません"),
            ValidationIssue::MissingComments { failed_checks } => write!(
                f,
                "不合格の項目（{}）があるためコメントを入力してください",
                failed_checks.join(", ")
            ),
        }
    }
}

/// 入力チェック（指摘がなければ空）
pub fn validate(request: &SaveRequest) -> Vec<ValidationIssue> {
    if request.draft {
        return Vec::new();
    }

    let mut issues = Vec::new();
    let readings = &request.readings;

    if readings.status != ResolvedStatus::Online && readings.status_notes.trim().is_empty() {
        issues.push(ValidationIssue::MissingStatusNotes {
            status: readings.status,
        });
    }

    if !request.reconciliation.verified {
        issues.push(ValidationIssue::NotVerified);
    }

    if readings.has_failed_check() && readings.comments.trim().is_empty() {
        issues.push(ValidationIssue::MissingComments {
            failed_checks: readings.failed_checks(),
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use equip_reading_common::{EquipmentCategory, EquipmentKeys};

    fn valid_request() -> SaveRequest {
        let mut request = SaveRequest::new(EquipmentCategory::Scc, EquipmentKeys::new("1", "2"));
        request.reconciliation.verified = true;
        request
    }

    #[test]
    fn test_valid_online_request() {
        assert!(validate(&valid_request()).is_empty());
    }

    #[test]
    fn test_status_notes_required_when_not_online() {
        let mut request = valid_request();
        request.readings.status = ResolvedStatus::Offline;
        request.readings.status_notes = "   ".to_string();

        assert_eq!(
            validate(&request),
            vec![ValidationIssue::MissingStatusNotes {
                status: ResolvedStatus::Offline
            }]
        );

        request.readings.status_notes = "Utility feed down".to_string();
        assert!(validate(&request).is_empty());
    }

    #[test]
    fn test_verification_required() {
        let mut request = valid_request();
        request.reconciliation.verified = false;
        assert_eq!(validate(&request), vec![ValidationIssue::NotVerified]);
    }

    #[test]
    fn test_comments_required_for_failed_checks() {
        let mut request = valid_request();
        request.readings.fields.insert("Fan", "F");
        request.readings.fields.insert("Filter", "P");

        assert_eq!(
            validate(&request),
            vec![ValidationIssue::MissingComments {
                failed_checks: vec!["Fan".to_string()]
            }]
        );

        request.readings.comments = "Fan bearing noisy".to_string();
        assert!(validate(&request).is_empty());
    }

    #[test]
    fn test_multiple_issues_reported_together() {
        let mut request = valid_request();
        request.reconciliation.verified = false;
        request.readings.status = ResolvedStatus::MinorDeficiency;
        request.readings.fields.insert("Fan", "F");

        assert_eq!(validate(&request).len(), 3);
    }

    #[test]
    fn test_draft_skips_validation() {
        let mut request = valid_request();
        request.draft = true;
        request.reconciliation.verified = false;
        request.readings.status = ResolvedStatus::CriticalDeficiency;
        assert!(validate(&request).is_empty());
    }

    #[test]
    fn test_issue_messages() {
        let issue = ValidationIssue::MissingComments {
            failed_checks: vec!["Fan".into(), "Belt".into()],
        };
        assert!(issue.to_string().contains("Fan, Belt"));
    }
}
