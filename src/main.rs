use budtender::core::interactive;
use budtender::domain::ports::ConfigProvider;
use budtender::utils::{logger, validation::Validate};
use budtender::{CliConfig, Engine, FileConfig, LocalStorage, MenuPipeline, OllamaClient};
use clap::Parser;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting budtender CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let interactive_enabled = !cli.no_interactive;

    let result = if let Some(config_path) = cli.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", config_path);
        let config = match FileConfig::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", config_path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        };

        let monitor_enabled = cli.monitor || config.monitoring_enabled();
        run(config, monitor_enabled, interactive_enabled).await
    } else {
        let monitor_enabled = cli.monitor;
        run(cli, monitor_enabled, interactive_enabled).await
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            budtender::utils::error::ErrorSeverity::Low => 0,
            budtender::utils::error::ErrorSeverity::Medium => 2,
            budtender::utils::error::ErrorSeverity::High => 1,
            budtender::utils::error::ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C>(config: C, monitor_enabled: bool, interactive_enabled: bool) -> budtender::Result<()>
where
    C: ConfigProvider + Validate,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        return Err(e);
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    display_config_summary(&config);

    let storage = LocalStorage::new(config.output_path().to_string());
    let model = OllamaClient::new(
        config.model_endpoint().to_string(),
        config.model_name().to_string(),
    );
    let recommender = model.clone();

    let pipeline = MenuPipeline::new(storage, config, model);
    let engine = Engine::new_with_monitoring(pipeline, monitor_enabled);

    let report = engine.run().await?;

    if let Some(path) = &report.output_path {
        tracing::info!("✅ Run completed in {:?}", report.duration);
        println!("\nResults saved to: {}", path);
    }

    if interactive_enabled {
        interactive::run_loop(
            &recommender,
            &report.strains,
            BufReader::new(tokio::io::stdin()),
        )
        .await?;
    }

    Ok(())
}

fn display_config_summary<C: ConfigProvider>(config: &C) {
    println!("📋 Configuration Summary:");
    println!("  Menu: {}", config.menu_url());
    println!("  Pages: {}", config.pages());
    println!(
        "  Model: {} @ {}",
        config.model_name(),
        config.model_endpoint()
    );
    println!("  Output: {}", config.output_path());
    println!();
}
