use clap::Parser;
use phaselist::core::report;
use phaselist::utils::{logger, validation::Validate};
use phaselist::{
    resolve_arguments, CliConfig, PhaseListEngine, PhaseListError, Prompter, Resolution, Settings,
    Wgs84Geodesic,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting phaselist");
    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = run(&cli, &settings).await {
        tracing::error!(
            "❌ phaselist failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig, settings: &Settings) -> Result<(), PhaseListError> {
    settings.validate()?;
    let stations = settings.station_table()?;
    tracing::debug!("Station table has {} entries", stations.len());

    let params = match resolve_arguments(&cli.params, &stations) {
        Resolution::Resolved(params) => params,
        Resolution::NeedsInteractiveInput => {
            tracing::info!("Falling back to interactive input");
            Prompter::stdio().prompt_parameters()?
        }
    };

    let client = settings.travel_time_client()?;
    tracing::info!("🔗 Travel-time service: {}", client.endpoint());

    let engine = PhaseListEngine::new(client, Wgs84Geodesic, settings.model.clone())
        .with_ray_paths(settings.ray_paths);
    tracing::debug!("Using {} earth model", engine.model());
    let phase_report = engine.run(&params).await?;

    let rendered = report::render(&phase_report, settings.format)?;
    // json 沒有結尾換行
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }

    tracing::info!("✅ Listed {} phase arrivals", phase_report.arrivals.len());
    Ok(())
}
