//! 保存処理の状態と結果

use equip_reading_common::{ResolvedStatus, StatusMetadata};
use serde::Serialize;

/// 保存処理の段階
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Validating,
    SavingReadings,
    SavingReconciliation,
    ResolvingStatus,
    SavingStatus,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Validating => "Validating",
            Stage::SavingReadings => "SavingReadings",
            Stage::SavingReconciliation => "SavingReconciliation",
            Stage::ResolvingStatus => "ResolvingStatus",
            Stage::SavingStatus => "SavingStatus",
        };
        f.write_str(name)
    }
}

/// 保存処理の状態遷移
///
/// `Idle → Validating → SavingReadings → SavingReconciliation → ResolvingStatus
///  → SavingStatus → Succeeded | Failed(stage)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SaveState {
    #[default]
    Idle,
    Validating,
    SavingReadings,
    SavingReconciliation,
    ResolvingStatus,
    SavingStatus,
    Succeeded,
    Failed(Stage),
}

impl SaveState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SaveState::Succeeded | SaveState::Failed(_))
    }
}

/// 最終ステータスの決まり方
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StatusSource {
    /// サマリー行とマスタから判定
    Resolved,
    /// 作業者が Offline / CriticalDeficiency を指定（判定を省略）
    OperatorForced,
    /// 下書き保存（判定なし）
    Draft,
    /// 判定用データの取得に失敗し、フォーム値から決定
    Degraded { reason: String },
}

/// 保存成功時の内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub status: ResolvedStatus,
    pub source: StatusSource,
    pub metadata: StatusMetadata,
}

/// 保存結果
///
/// 段階1-2で失敗しても巻き戻しは行わない。失敗した段階を呼び出し側に返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SaveOutcome {
    Succeeded(SaveReport),
    Failed { stage: Stage, message: String },
}

impl SaveOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, SaveOutcome::Succeeded(_))
    }

    pub fn report(&self) -> Option<&SaveReport> {
        match self {
            SaveOutcome::Succeeded(report) => Some(report),
            SaveOutcome::Failed { .. } => None,
        }
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            SaveOutcome::Succeeded(_) => None,
            SaveOutcome::Failed { stage, .. } => Some(*stage),
        }
    }
}
