//! Equipment Reading Common Library
//!
//! 点検画面・CLIで共有される型と総合ステータス判定

pub mod codes;
pub mod date_code;
pub mod error;
pub mod resolver;
pub mod types;

pub use codes::ReadingCode;
pub use date_code::{DateCode, StatusMetadata};
pub use error::{Error, Result};
pub use resolver::{resolve, ResolveOptions};
pub use types::{
    EquipmentCategory, EquipmentKeys, InspectionRow, ResolvedStatus, StatusType, StatusTypeLookup,
};
