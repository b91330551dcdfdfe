//! 保存オーケストレーション
//!
//! 点検画面の保存処理を段階ごとに逐次実行する:
//! 1. 点検値の保存
//! 2. 照合結果の保存
//! 3. 総合ステータス判定（サマリー行 + ステータス種別マスタを取得）
//! 4. 最終ステータスの保存（月・年付き）
//!
//! 段階1-2の失敗は中断、段階3の失敗はフォーム値で代替して続行、
//! 段階4の失敗は報告のみ（巻き戻しなし）。

mod outcome;
mod validation;

pub use outcome::{SaveOutcome, SaveReport, SaveState, Stage, StatusSource};
pub use validation::{validate, ValidationIssue};

use crate::error::{EquipError, Result};
use crate::forms::SaveRequest;
use crate::service::EquipmentService;
use equip_reading_common::{resolve, ResolveOptions, ResolvedStatus, StatusMetadata};
use tracing::{debug, info, warn};

/// 段階3で取得に失敗したときのステータス
///
/// "F" の項目があれば `OnLine(MinorDeficiency)`、なければ作業者の選択値
pub fn fallback_status(request: &SaveRequest) -> ResolvedStatus {
    if request.readings.has_failed_check() {
        ResolvedStatus::MinorDeficiency
    } else {
        request.readings.status
    }
}

pub struct SaveOrchestrator<S> {
    service: S,
    state: SaveState,
    transitions: Vec<SaveState>,
}

impl<S: EquipmentService> SaveOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: SaveState::Idle,
            transitions: Vec::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// 現在の状態
    pub fn state(&self) -> SaveState {
        self.state
    }

    /// 直近の保存で通過した状態
    pub fn transitions(&self) -> &[SaveState] {
        &self.transitions
    }

    /// 保存処理を実行
    ///
    /// 自動リトライはしない。再実行は呼び出し側で行う。
    pub async fn save(&mut self, request: SaveRequest) -> SaveOutcome {
        self.transitions.clear();
        self.enter(SaveState::Idle);

        self.enter(SaveState::Validating);
        let issues = validate(&request);
        if !issues.is_empty() {
            return self.fail(Stage::Validating, EquipError::Validation(issues));
        }

        self.enter(SaveState::SavingReadings);
        if let Err(e) = self
            .service
            .save_readings(request.category, &request.keys, &request.readings)
            .await
        {
            return self.fail(Stage::SavingReadings, e);
        }
        info!(keys = %request.keys, category = %request.category, "readings saved");

        self.enter(SaveState::SavingReconciliation);
        if let Err(e) = self
            .service
            .save_reconciliation(&request.keys, &request.reconciliation)
            .await
        {
            return self.fail(Stage::SavingReconciliation, e);
        }
        info!(keys = %request.keys, "reconciliation saved");

        let (status, source) = self.determine_status(&request).await;

        self.enter(SaveState::SavingStatus);
        let metadata = StatusMetadata::from_date_code(&request.readings.date_code);
        if let Err(e) = self
            .service
            .save_status(&request.keys, status, &request.readings.status_notes, &metadata)
            .await
        {
            return self.fail(Stage::SavingStatus, e);
        }
        info!(keys = %request.keys, %status, "status saved");

        self.enter(SaveState::Succeeded);
        SaveOutcome::Succeeded(SaveReport {
            status,
            source,
            metadata,
        })
    }

    async fn determine_status(&mut self, request: &SaveRequest) -> (ResolvedStatus, StatusSource) {
        let operator_status = request.readings.status;

        if request.draft {
            return (operator_status, StatusSource::Draft);
        }
        // Offline / CriticalDeficiency は作業者の判断を優先し、再判定しない
        if matches!(
            operator_status,
            ResolvedStatus::Offline | ResolvedStatus::CriticalDeficiency
        ) {
            return (operator_status, StatusSource::OperatorForced);
        }

        self.enter(SaveState::ResolvingStatus);
        match self.fetch_and_resolve(request).await {
            Ok(status) => (status, StatusSource::Resolved),
            Err(e) => {
                let status = fallback_status(request);
                warn!(
                    keys = %request.keys,
                    category = %request.category,
                    error = %e,
                    fallback = %status,
                    "status resolution degraded, using form status"
                );
                (
                    status,
                    StatusSource::Degraded {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    async fn fetch_and_resolve(&self, request: &SaveRequest) -> Result<ResolvedStatus> {
        let row = self
            .service
            .get_job_summary_row(&request.keys, request.category)
            .await?;
        let lookup = self
            .service
            .get_status_type_lookup(request.category)
            .await?;

        let status = resolve(&row, &lookup, &ResolveOptions::for_category(request.category));
        debug!(fields = row.len(), lookup_entries = lookup.len(), %status, "status resolved");
        Ok(status)
    }

    fn enter(&mut self, state: SaveState) {
        debug!(from = ?self.state, to = ?state, "save state");
        self.state = state;
        self.transitions.push(state);
    }

    fn fail(&mut self, stage: Stage, error: EquipError) -> SaveOutcome {
        warn!(%stage, error = %error, "save failed");
        self.enter(SaveState::Failed(stage));
        SaveOutcome::Failed {
            stage,
            message: error.to_string(),
        }
    }
}
