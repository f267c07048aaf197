use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use sabai::config::Config;
use sabai::ingest::IngestClient;
use sabai::server::routes::build_router;
use sabai::server::AppState;
use sabai::storage::{sample_stations, StationStore};

#[tokio::main]
async fn main() {
    // Load .env
    let _ = dotenvy::dotenv();

    // Load config first (needed for logging setup)
    let config = Config::load(None).expect("failed to load config");

    // Initialize tracing from LoggingConfig
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .init();
        }
    }

    tracing::info!("sabai starting");
    sabai::metrics::init();

    // Initialize station store and seed the samples on first start
    let store = StationStore::from_config(&config.storage).expect("failed to initialize storage");
    match store.seed_if_empty(&sample_stations()).await {
        Ok(0) => {}
        Ok(count) => tracing::info!(count, "seeded sample stations"),
        Err(e) => tracing::warn!(error = %e, "failed to seed sample stations"),
    }

    let ingest = IngestClient::from_config(&config.ingest).expect("failed to build ingest client");
    match ingest {
        Some(ref client) => tracing::info!(url = %client.url(), "submissions go to ingest endpoint"),
        None => tracing::warn!("ingest endpoint not configured, submissions are saved locally"),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(store, ingest, config);
    let app = build_router(state);

    tracing::info!(addr = %addr, "listening");

    let listener = TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("server error");
}
