use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use mentor_match::config::Settings;
use mentor_match::core::{MatchLifecycleManager, MatchSelector, SystemClock, UuidGenerator};
use mentor_match::models::MatchingWeights;
use mentor_match::routes::{self, matches::AppState};
use mentor_match::services::MatchStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

/// Install the global tracing subscriber
///
/// `LOG_LEVEL` / `LOG_FORMAT` override the config file; `RUST_LOG` wins over both.
fn init_logging(settings: &Settings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

/// Periodically expire idle matches
async fn run_cleanup_loop(store: Arc<MatchStore>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    // first tick fires immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let sweep = store.cleanup_inactive().await;
        tracing::debug!(
            "Cleanup sweep expired {} matches and {} requests",
            sweep.matches.len(),
            sweep.requests.len()
        );
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    init_logging(&settings);

    info!("Starting mentor matching service...");

    let weights = MatchingWeights::from(&settings.matching.weights);
    let selector = MatchSelector::new(weights);

    info!("Selector initialized with weights: {:?}", selector.weights());

    let lifecycle = MatchLifecycleManager::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
        .with_threshold(settings.matching.inactive_threshold());

    let store = Arc::new(MatchStore::new(selector, lifecycle));

    let cleanup_every = settings.matching.cleanup_interval_secs();
    if cleanup_every > 0 {
        info!("Inactive match cleanup every {}s", cleanup_every);
        actix_web::rt::spawn(run_cleanup_loop(store.clone(), Duration::from_secs(cleanup_every)));
    } else {
        warn!("Background cleanup disabled; idle matches expire only via /matches/cleanup");
    }

    // Build application state
    let app_state = AppState { store };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
