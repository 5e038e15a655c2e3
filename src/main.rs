//! Preference Evolution CLI
//!
//! Runs shift detection, summaries, and tracking against the configured
//! history store and prints the result as JSON.

use clap::{Parser, Subcommand};
use preference_evolution::{
    adapters::{JsonFileHistoryStore, StaticPreferenceAnalyzer},
    application::{
        DetectShiftQuery, EvolutionHandlers, GetEvolutionSummaryQuery,
        TrackPreferenceEvolutionCommand,
    },
    config::{AppConfig, LoggingConfig},
    domain::foundation::UserId,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "preference-evolution")]
#[command(about = "Detect and forecast shifts in viewer preferences", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Viewer whose history is analysed
    #[arg(short, long, env = "PREFERENCE_EVOLUTION_USER")]
    user: String,

    /// History root directory (overrides configuration)
    #[arg(long)]
    storage_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Current trend over recent snapshots plus a forecast
    Detect,

    /// Ranked preference changes over a time window
    Summary {
        /// Look-back window in days (defaults to configuration)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Record current preferences and the shifts detected before them
    Track {
        /// JSON file with the viewer's current preferences
        #[arg(short, long)]
        preferences: PathBuf,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr); // stdout carries the JSON result

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.storage_dir {
        config.storage.base_dir = dir;
    }
    let config = config.validated()?;

    init_tracing(&config.logging);
    debug!("Preference Evolution v{} starting...", env!("CARGO_PKG_VERSION"));

    let user_id = UserId::new(cli.user)?;
    let store = Arc::new(JsonFileHistoryStore::new(
        &config.storage.base_dir,
        config.storage.history_category.clone(),
    ));

    let analyzer = match &cli.command {
        Commands::Track { preferences } => {
            StaticPreferenceAnalyzer::from_json_file(user_id.clone(), preferences).await?
        }
        _ => StaticPreferenceAnalyzer::new(),
    };

    let handlers = EvolutionHandlers::new(config.evolution_settings(), store, Arc::new(analyzer));

    match cli.command {
        Commands::Detect => {
            let report = handlers
                .detect_shift
                .handle(DetectShiftQuery { user_id })
                .await?;
            print_json(&report)?;
        }
        Commands::Summary { days } => {
            let summary = handlers
                .get_summary
                .handle(GetEvolutionSummaryQuery {
                    user_id,
                    time_range_days: days,
                })
                .await?;
            print_json(&summary)?;
        }
        Commands::Track { .. } => {
            let result = handlers
                .track_evolution
                .handle(TrackPreferenceEvolutionCommand { user_id })
                .await?;
            print_json(&result)?;
        }
    }

    Ok(())
}
