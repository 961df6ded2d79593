use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vida_screen::config::Settings;
use vida_screen::core::FeatureSchema;
use vida_screen::services::{ArtifactBundle, DatasetSummary};
use vida_screen::ui::{self, AppState};

fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Vida obesity screening service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // The schema version the shipped artifact was trained against
    let schema = Arc::new(FeatureSchema::canonical());

    // Load the artifact pair (optional - the UI can run without it, with the
    // diagnostic action disabled)
    let bundle = match ArtifactBundle::load(
        Path::new(&settings.artifacts.model_path),
        Path::new(&settings.artifacts.encoder_path),
        &schema,
    ) {
        Ok(bundle) => {
            info!(
                "Artifact bundle loaded ({} classes, {} feature columns)",
                bundle.encoder().len(),
                schema.len()
            );
            Some(Arc::new(bundle))
        }
        Err(e) => {
            error!("Failed to load artifact bundle, diagnostic action disabled: {}", e);
            None
        }
    };

    // Load dashboard statistics (optional - placeholders otherwise)
    let dataset = match &settings.dataset.path {
        Some(path) => match DatasetSummary::load(Path::new(path)) {
            Ok(summary) => {
                info!("Dataset statistics computed ({} records)", summary.records);
                Some(Arc::new(summary))
            }
            Err(e) => {
                warn!("Failed to read dataset ({}), using placeholder figures", e);
                None
            }
        },
        None => {
            info!("No dataset configured, dashboard will show placeholder figures");
            None
        }
    };

    // Build application state
    let state = AppState {
        bundle,
        schema,
        dataset,
        report_url: settings.report.url,
        show_probabilities: settings.screening.show_probabilities,
    };

    ui::run(&state)
}
