//! 設備点検の保存オーケストレーション
//!
//! 総合ステータス判定は `equip_reading_common` 側、
//! 保存の段階実行・外部APIインターフェース・CLIはこちら側。

pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod orchestrator;
pub mod service;

pub use error::{EquipError, Result};
pub use forms::{ReadingForm, ReconciliationForm, SaveRequest};
pub use orchestrator::{SaveOrchestrator, SaveOutcome, SaveReport, SaveState, Stage, StatusSource};
pub use service::EquipmentService;
