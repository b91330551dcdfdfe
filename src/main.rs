use anyhow::{bail, Context, Result};
use clap::Parser;
use equip_reading::{cli, config, forms, logging, orchestrator, service};
use equip_reading_common::{
    resolve, InspectionRow, ResolveOptions, StatusMetadata, StatusTypeLookup,
};
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use orchestrator::{SaveOrchestrator, SaveOutcome, StatusSource};
use service::{CachedLookups, JsonDirService};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // 設定ファイルは save / config でのみ読む（壊れていても他のコマンドは動く）
    let config = if cli.command.uses_config() {
        Some(Config::load()?)
    } else {
        None
    };
    logging::init(
        cli.verbose,
        config.as_ref().map_or(config::DEFAULT_LOG_LEVEL, |c| c.log_level.as_str()),
    );

    match cli.command {
        Commands::Resolve { row, lookup, category, exclude } => {
            let row_value: serde_json::Value = read_json(&row)?;
            let row = InspectionRow::from_json_value(&row_value)
                .with_context(|| format!("サマリー行を読み込めません: {}", row.display()))?;

            let lookup: StatusTypeLookup = match lookup {
                Some(path) => read_json(&path)?,
                None => StatusTypeLookup::new(),
            };

            let options = exclude
                .into_iter()
                .fold(ResolveOptions::for_category(category), |opts, field| opts.exclude(field));

            let status = resolve(&row, &lookup, &options);
            println!("{}", status);
        }

        Commands::Save { request, data_dir, draft } => {
            println!("🔧 equip-reading - 点検結果の保存\n");

            let mut save_request: forms::SaveRequest = read_json(&request)?;
            if draft {
                save_request.draft = true;
            }

            let config = config.unwrap_or_default();
            let data_dir = config.resolve_data_dir(data_dir)?;
            let service = CachedLookups::new(JsonDirService::new(&data_dir), config.lookup_ttl());
            let mut orchestrator = SaveOrchestrator::new(service);

            let keys = save_request.keys.clone();
            let category = save_request.category;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
            spinner.set_message(format!("{} {} を保存中...", category, keys));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = orchestrator.save(save_request).await;
            spinner.finish_and_clear();

            match outcome {
                SaveOutcome::Succeeded(report) => {
                    println!("✔ 点検値を保存");
                    println!("✔ 照合結果を保存");
                    match &report.source {
                        StatusSource::Resolved => println!("✔ ステータス判定: {}", report.status),
                        StatusSource::OperatorForced => {
                            println!("✔ ステータス（指定値）: {}", report.status)
                        }
                        StatusSource::Draft => println!("✔ ステータス（下書き）: {}", report.status),
                        // 判定データの取得失敗は利用者には表示しない（ログのみ）
                        StatusSource::Degraded { .. } => {
                            println!("✔ ステータス: {}", report.status)
                        }
                    }
                    if !report.metadata.is_empty() {
                        println!("  {} {}", report.metadata.month, report.metadata.year);
                    }
                    println!("\n✅ 保存完了");
                }
                SaveOutcome::Failed { stage, message } => {
                    bail!("保存に失敗しました（{}）: {}", stage, message);
                }
            }
        }

        Commands::DateCode { date, year, month } => {
            let metadata = match (date, year, month) {
                (Some(date), _, _) => StatusMetadata::from_date_str(&date),
                (None, Some(year), Some(month)) => StatusMetadata::from_year_month(&year, &month),
                _ => bail!("--date または --year と --month を指定してください"),
            };

            if metadata.is_empty() {
                println!("(空)");
            } else {
                println!("{} {}", metadata.month, metadata.year);
            }
        }

        Commands::Config { set_data_dir, set_lookup_ttl, show } => {
            let mut config = config.unwrap_or_default();

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データディレクトリを設定しました");
            }

            if let Some(seconds) = set_lookup_ttl {
                config.set_lookup_ttl(seconds)?;
                println!("✔ キャッシュ期間を設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  データディレクトリ: {}",
                    config
                        .data_dir
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  マスタキャッシュ: {}秒", config.lookup_ttl_seconds);
                println!("  ログレベル: {}", config.log_level);
            }
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("ファイルを読み込めません: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("JSONを解析できません: {}", path.display()))
}
