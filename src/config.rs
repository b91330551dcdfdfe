use crate::error::{EquipError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "EQUIP_READING_DATA_DIR";

/// 設定ファイルを読まないコマンドのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JsonDirService のルート
    pub data_dir: Option<PathBuf>,
    /// ステータス種別マスタのキャッシュ期間（秒、0で無効）
    pub lookup_ttl_seconds: u64,
    /// 既定のログレベル（RUST_LOG が優先）
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EquipError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("equip-reading").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            data_dir: None,
            lookup_ttl_seconds: 300,
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }

    pub fn lookup_ttl(&self) -> Duration {
        Duration::from_secs(self.lookup_ttl_seconds)
    }

    /// データディレクトリを決定
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn resolve_data_dir(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir);
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        self.data_dir.clone().ok_or_else(|| {
            EquipError::Config(
                "データディレクトリが未設定です。`equip-reading config --set-data-dir DIR` で設定してください"
                    .into(),
            )
        })
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }

    pub fn set_lookup_ttl(&mut self, seconds: u64) -> Result<()> {
        self.lookup_ttl_seconds = seconds;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.lookup_ttl(), Duration::from_secs(300));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"lookup_ttl_seconds": 0}"#).unwrap();
        assert_eq!(config.lookup_ttl_seconds, 0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        let dir = config.resolve_data_dir(Some(PathBuf::from("/from/arg"))).unwrap();
        assert_eq!(dir, PathBuf::from("/from/arg"));
    }
}
