use clap::Parser;
use placement_stats::adapters::build_source;
use placement_stats::core::ConfigProvider;
use placement_stats::utils::error::StatsError;
use placement_stats::utils::{logger, validation::Validate};
use placement_stats::{DashboardPipeline, LocalStorage, ReportEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Placement statistics report driven by a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the report year from config
    #[arg(long)]
    year: Option<i32>,

    /// Show what would be generated without fetching any records
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(year) = args.year {
        config.report.year = Some(year);
        tracing::info!("🔧 Report year overridden to: {}", year);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let source_spec = match config.source_spec() {
        Ok(spec) => spec,
        Err(e) => fail(&e),
    };

    display_config_summary(&config, &source_spec.describe());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no records will be fetched");
        return Ok(());
    }

    let source = match build_source(&source_spec, LocalStorage::new(".".to_string())) {
        Ok(source) => source,
        Err(e) => fail(&e),
    };
    let storage = LocalStorage::new(config.output_path().to_string());
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

fn display_config_summary(config: &TomlConfig, source: &str) {
    tracing::info!("📋 Report: {}", config.report.name);
    tracing::info!("   Source: {}", source);
    match config.report_year() {
        Some(year) => tracing::info!("   Year: {}", year),
        None => tracing::info!("   Year: latest available"),
    }
    tracing::info!(
        "   Top recruiters: {}, trend window: {} years",
        config.top_n(),
        config.trend_years()
    );
    tracing::info!(
        "   Output: {} [{}]",
        config.output_path(),
        config.output_formats().join(", ")
    );
}

fn fail(e: &StatsError) -> ! {
    tracing::error!(
        "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
