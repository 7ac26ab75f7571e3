mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, EnvCredentials, SecurityConfig};
use handlers::health::not_found;
use routes::api;
use services::{ReqwestProviderClient, SearchService};

#[derive(Clone)]
pub struct AppState {
    pub search_service: SearchService,
    pub config: Config,
    pub start_time: Instant,
}

fn build_cors(security: &SecurityConfig) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if security.allowed_origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        security
            .allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting book search proxy on port {}, forwarding to {}",
        config.server.port, config.naver.search_endpoint
    );

    let search_service = SearchService::new(
        Arc::new(ReqwestProviderClient::new()),
        Arc::new(EnvCredentials::default()),
        config.naver.search_endpoint.clone(),
    );

    let state = AppState {
        search_service,
        config: config.clone(),
        start_time: Instant::now(),
    };

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(build_cors(&state.config.security))
            .wrap(Logger::default())
            .configure(api::config)
            .default_service(web::route().to(not_found))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}",
        config.server.host, config.server.port
    );

    server.workers(config.server.workers).run().await
}
