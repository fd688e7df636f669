//! semconv_sync - copy semantic-convention descriptions onto Honeycomb columns
//!
//! # Usage
//!
//! ```bash
//! # Print every attribute found under ./model
//! semconv_sync --parse-models-only
//!
//! # Fill empty column descriptions in every dataset
//! HONEYCOMB_API_KEY=... semconv_sync --model-path semconv/model
//!
//! # Show what would change, overwriting existing descriptions
//! semconv_sync --model-path semconv/model,vendor/model --force --dry-run
//! ```
//!
//! Exit codes: 1 configuration, 2 model parsing, 3 Honeycomb sync.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use semconv_sync::config::{
    cli_error_exit_code, Cli, RunConfig, RunMode, EXIT_CONFIG, EXIT_PARSE, EXIT_SYNC,
};
use semconv_sync::honeycomb::HoneycombClient;
use semconv_sync::{load_semantic_models, sync_descriptions, SemanticAttributes};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,semconv_sync=info".into()),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version land here too and print to stdout
            let _ = e.print();
            return ExitCode::from(cli_error_exit_code(&e));
        }
    };

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    info!("Starting Honeycomb OpenTelemetry Semantic Model Updater...");
    if config.options.dry_run {
        info!("Running in dry run mode");
    }

    info!("Parsing OpenTelemetry semantic models...");
    let attributes = match load_semantic_models(&config.model_paths) {
        Ok(attributes) => attributes,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_PARSE);
        }
    };
    info!("Found {} semantic attributes", attributes.len());

    match &config.mode {
        RunMode::ParseModelsOnly => print_attributes(&attributes),
        RunMode::Sync { api_key, api_url } => {
            if let Err(e) = run_sync(&config, api_key, api_url.as_str(), &attributes).await {
                error!("{:#}", e);
                return ExitCode::from(EXIT_SYNC);
            }
        }
    }

    info!("Done!");
    ExitCode::SUCCESS
}

async fn run_sync(
    config: &RunConfig,
    api_key: &str,
    api_url: &str,
    attributes: &SemanticAttributes,
) -> Result<()> {
    let client = HoneycombClient::with_base_url(api_key, api_url)
        .context("Failed to create Honeycomb client")?
        .with_update_interval(config.update_interval);

    let report = sync_descriptions(&client, attributes, config.options)
        .await
        .context("Error while updating Honeycomb datasets")?;
    info!(
        "Scanned {} columns across {} datasets",
        report.columns_scanned, report.datasets
    );
    Ok(())
}

fn print_attributes(attributes: &SemanticAttributes) {
    println!();
    for (name, description) in attributes.sorted() {
        println!("{} : {}", name, description);
    }
    println!();
    println!("{} semantic attributes found", attributes.len());
}
