use tracing_subscriber::EnvFilter;

/// ログ出力を初期化（stderrへ出力、RUST_LOG が優先）
pub fn init(verbose: bool, default_level: &str) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("equip_reading={0},equip_reading_common={0}", level))
    });

    // 二重初期化（テストなど）は無視
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
