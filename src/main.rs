use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use flight_corridor::config::Settings;
use flight_corridor::routes::{self, handle_json_payload_error, handle_path_error, AppState};
use flight_corridor::services::{JsonFileSource, PoiCache};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("info", "json");
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting flight corridor service...");

    let engine = settings.corridor.to_engine().map_err(|e| {
        error!("Invalid corridor configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!(
        "Corridor engine initialized (tiers: {:?}, prefilter buffer: {} km)",
        engine.tiers().iter().collect::<Vec<_>>(),
        engine.buffer_km()
    );

    let cache = Arc::new(PoiCache::new(
        JsonFileSource::new(&settings.catalog.data_dir),
        settings.catalog.max_datasets,
        settings.catalog.ttl_secs,
    ));

    info!(
        "Dataset cache initialized (dir: {}, max: {} datasets, TTL: {}s)",
        settings.catalog.data_dir, settings.catalog.max_datasets, settings.catalog.ttl_secs
    );

    // Build application state
    let app_state = AppState { cache, engine };

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
            .configure(routes::configure_routes::<JsonFileSource>)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
