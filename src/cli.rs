use clap::{Parser, Subcommand};
use equip_reading_common::EquipmentCategory;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "equip-reading")]
#[command(about = "設備点検ステータス判定・保存ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// サマリー行とマスタから総合ステータスを判定
    Resolve {
        /// サマリー行JSONファイル（オブジェクトまたは配列）
        #[arg(long, required = true)]
        row: PathBuf,

        /// ステータス種別マスタJSONファイル（省略時は空）
        #[arg(long)]
        lookup: Option<PathBuf>,

        /// 設備カテゴリ (ATS/SCC/RECTIFIER/GENERATOR/Other)
        #[arg(short, long, default_value = "ATS")]
        category: EquipmentCategory,

        /// 追加の除外フィールド
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// 保存リクエストJSONを順に保存
    Save {
        /// 保存リクエストJSONファイル
        #[arg(required = true)]
        request: PathBuf,

        /// データディレクトリ（省略時は設定値）
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// 下書き保存（入力チェック・ステータス判定なし）
        #[arg(long)]
        draft: bool,
    },

    /// 日付コードから月・年を求める
    DateCode {
        /// 日付文字列 (2024-03-15, 03/15/2024, March 2024 など)
        #[arg(long, conflicts_with_all = ["year", "month"])]
        date: Option<String>,

        /// 年
        #[arg(long, requires = "month")]
        year: Option<String>,

        /// 月名または月番号
        #[arg(long, requires = "year")]
        month: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// マスタのキャッシュ期間（秒）を設定
        #[arg(long)]
        set_lookup_ttl: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// 設定ファイルを必要とするコマンドか
    pub fn uses_config(&self) -> bool {
        matches!(self, Commands::Save { .. } | Commands::Config { .. })
    }
}
