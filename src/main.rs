use clap::Parser;
use weather_etl::config::toml_config::TomlConfig;
use weather_etl::core::ConfigProvider;
use weather_etl::utils::{logger, validation::Validate};
use weather_etl::{CliConfig, EtlEngine, SqliteSink, WeatherPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("🚀 Starting weather-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Some(config_path) = cli.config.clone() {
        tracing::info!(
            "📁 Loading pipeline definition from: {}",
            config_path.display()
        );

        let config = match TomlConfig::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "❌ Failed to load config file '{}': {}",
                    config_path.display(),
                    e
                );
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        };

        if let Err(e) = config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }

        tracing::info!("✅ Configuration loaded and validated successfully");
        tracing::info!(
            "Pipeline: {} v{}",
            config.pipeline.name,
            config.pipeline.version
        );

        let database = config.database_path().to_string();
        let monitor_enabled = cli.monitor || config.monitoring_enabled();
        run(config, database, monitor_enabled, cli.dry_run).await
    } else {
        if let Err(e) = cli.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }

        let database = cli.database.clone();
        let monitor_enabled = cli.monitor;
        let dry_run = cli.dry_run;
        run(cli, database, monitor_enabled, dry_run).await
    }
}

async fn run<C: ConfigProvider>(
    config: C,
    database: String,
    monitor_enabled: bool,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    display_config_summary(&config, &database, dry_run);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config, &database);
        return Ok(());
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let sink = SqliteSink::new(&database);
    let pipeline = WeatherPipeline::new(sink, config)?;
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!("✅ ETL process completed successfully!");
            println!(
                "📁 {} rows appended to weather_data in {} ({:.1}s)",
                report.rows_loaded,
                database,
                report.duration.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ ETL process failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 No rows from this run were committed; it is safe to retry as a whole");
            std::process::exit(1);
        }
    }
}

fn display_config_summary<C: ConfigProvider>(config: &C, database: &str, dry_run: bool) {
    println!("📋 Run Plan:");
    println!("  Source: {}", config.api_endpoint());
    println!("  Database: {} (table: weather_data)", database);
    println!("  Timeout: {}s per request", config.request_timeout_secs());
    println!("  Locations: {}", config.locations().len());

    for location in config.locations() {
        println!("    - {}", location);
    }

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run<C: ConfigProvider>(config: &C, database: &str) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Requests that would be made:");
    for location in config.locations() {
        println!(
            "  GET {}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            config.api_endpoint().trim_end_matches('/'),
            location.latitude,
            location.longitude
        );
    }

    println!();
    println!("💾 Destination:");
    println!(
        "  {} rows would be appended to weather_data in {}",
        config.locations().len(),
        database
    );
    println!("  One batch per invocation; scheduling and retries belong to the caller");

    println!();
    println!("✅ Dry run analysis complete. No requests were made, nothing was written.");
}
