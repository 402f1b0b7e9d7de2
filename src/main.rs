use std::process::ExitCode;

use sheet_export::adapters::console::ConsoleAdapter;
use sheet_export::adapters::google::GoogleServices;
use sheet_export::config::AppConfig;
use sheet_export::prettyprint::prettyprint::PrettyFormatter;
use sheet_export::ExportPipeline;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

const LOG_FILE: &str = "sheet_export.log";

fn setup_tracing() -> std::io::Result<()> {
    let indicatif_layer = IndicatifLayer::new();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer());

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("sheet_export", tracing::Level::TRACE),
        )
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(error) = setup_tracing() {
        eprintln!("❌ Could not create {}: {}", LOG_FILE, error);
        return ExitCode::FAILURE;
    }

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            tracing::error!("❌ configuration: {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    let services = match GoogleServices::global(&config.google).await {
        Ok(services) => services,
        Err(report) => {
            tracing::error!("❌ Google authentication: {:?}", report);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("✅ Connected to Google Sheets and Drive");

    let pipeline = ExportPipeline::new(&services.reader, &services.uploader, &config.export);
    let stdin = std::io::stdin();
    let mut console = ConsoleAdapter::new(pipeline, stdin.lock(), std::io::stdout());

    match console.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("❌ console: {}", error);
            ExitCode::FAILURE
        }
    }
}
