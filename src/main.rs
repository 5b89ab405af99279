use clap::Parser;
use placement_stats::adapters::build_source;
use placement_stats::utils::error::StatsError;
use placement_stats::utils::{logger, validation::Validate};
use placement_stats::{CliConfig, DashboardPipeline, LocalStorage, ReportEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting placement-stats CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let source_spec = match config.source() {
        Ok(spec) => spec,
        Err(e) => fail(&e),
    };
    let source = match build_source(&source_spec, LocalStorage::new(".".to_string())) {
        Ok(source) => source,
        Err(e) => fail(&e),
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = DashboardPipeline::new(source, storage, config);
    let engine = ReportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Report generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &StatsError) -> ! {
    tracing::error!(
        "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
