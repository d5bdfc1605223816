use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use ride_match::config::Settings;
use ride_match::core::MatchEvaluator;
use ride_match::routes::{self, AppState};
use ride_match::services::{StoreFiles, TripStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Ride Match service...");

    let files = StoreFiles {
        riders: settings.storage.riders_file.clone(),
        passengers: settings.storage.passengers_file.clone(),
    };
    let store = TripStore::new(
        &settings.storage.data_dir,
        files,
        settings.cache.max_capacity,
        settings.cache.ttl_secs,
    );

    if let Err(e) = store.ensure_structure().await {
        error!("Failed to prepare data directory {}: {}", settings.storage.data_dir, e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }

    info!(
        "Trip store ready at {} (cache TTL: {}s)",
        settings.storage.data_dir, settings.cache.ttl_secs
    );

    let evaluator = MatchEvaluator::new(settings.matching.max_score);

    info!("Match evaluator initialized with max score {}", evaluator.max_score());

    let app_state = AppState {
        store: Arc::new(store),
        evaluator,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
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
