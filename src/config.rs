//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::error::ConfigError;
use crate::honeycomb::client::{DEFAULT_UPDATE_INTERVAL_MS, HONEYCOMB_API_BASE};
use crate::sync::SyncOptions;

pub const DEFAULT_MODEL_PATH: &str = "model";

/// Process exit codes, one per phase
pub const EXIT_CONFIG: u8 = 1;
pub const EXIT_PARSE: u8 = 2;
pub const EXIT_SYNC: u8 = 3;

/// Exit code for a failed command line parse.
///
/// `--help` and `--version` surface as clap errors but are not failures.
pub fn cli_error_exit_code(error: &clap::Error) -> u8 {
    if error.use_stderr() {
        EXIT_CONFIG
    } else {
        0
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "semconv_sync")]
#[command(about = "Copy OpenTelemetry semantic-convention descriptions onto Honeycomb columns")]
#[command(long_about = None)]
pub struct Cli {
    /// Honeycomb API Key
    #[arg(long, env = "HONEYCOMB_API_KEY", hide_env_values = true)]
    pub honeycomb_api_key: Option<String>,

    /// Path(s) for OpenTelemetry semantic models, comma separated
    #[arg(
        long,
        env = "SEMANTIC_MODEL_PATH",
        default_value = DEFAULT_MODEL_PATH,
        value_delimiter = ','
    )]
    pub model_path: Vec<PathBuf>,

    /// Honeycomb API base URL
    #[arg(long, env = "HONEYCOMB_API_URL", default_value = HONEYCOMB_API_BASE)]
    pub api_url: String,

    /// Overwrite column descriptions that are already set
    #[arg(long, env = "SEMCONV_FORCE")]
    pub force: bool,

    /// Dry run mode
    #[arg(long)]
    pub dry_run: bool,

    /// Parse semantic models only and print them
    #[arg(long)]
    pub parse_models_only: bool,

    /// Minimum pause between column updates, in milliseconds
    #[arg(long, default_value_t = DEFAULT_UPDATE_INTERVAL_MS)]
    pub update_delay_ms: u64,
}

/// What the run does after the models are loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Print the attribute map and stop
    ParseModelsOnly,
    /// Push descriptions to Honeycomb
    Sync { api_key: String, api_url: Url },
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub model_paths: Vec<PathBuf>,
    pub mode: RunMode,
    pub options: SyncOptions,
    pub update_interval: Duration,
}

impl Cli {
    pub fn into_config(self) -> Result<RunConfig, ConfigError> {
        let model_paths: Vec<PathBuf> = self
            .model_path
            .into_iter()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if model_paths.is_empty() {
            return Err(ConfigError::NoModelPaths);
        }

        let mode = if self.parse_models_only {
            RunMode::ParseModelsOnly
        } else {
            let api_key = self
                .honeycomb_api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or(ConfigError::MissingApiKey)?;
            let api_url = Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidUrl {
                url: self.api_url.clone(),
                message: e.to_string(),
            })?;
            RunMode::Sync { api_key, api_url }
        };

        Ok(RunConfig {
            model_paths,
            mode,
            options: SyncOptions {
                force: self.force,
                dry_run: self.dry_run,
            },
            update_interval: Duration::from_millis(self.update_delay_ms),
        })
    }
}
