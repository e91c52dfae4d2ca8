use anyhow::Context;
use clap::Parser;
use segment_boxplot::utils::{logger, validation::Validate};
use segment_boxplot::{
    BoxPlotPipeline, ChartEngine, ChartJob, CliConfig, LocalStorage, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting segment-boxplot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let job = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?
            .into_job(),
        None => ChartJob::default(),
    };

    // 驗證配置
    if let Err(e) = job.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(cli.output_dir.clone());
    let pipeline = BoxPlotPipeline::new(storage.clone(), job);
    let engine = ChartEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run() {
        Ok(chart_file) => {
            let output_path = storage.full_path(&chart_file);
            tracing::info!("✅ Chart generated successfully!");
            println!("✅ Chart generated successfully!");
            println!("📁 Output saved to: {}", output_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Chart generation failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
