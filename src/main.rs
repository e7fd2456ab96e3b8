// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, storage, membership client and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::{MembershipClient, PlaceSearch};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting hbnb-places API...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize storage engine
    let storage = match config::init_storage(&config).await {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Membership client used by place search
    let membership = match MembershipClient::from_config(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("Failed to create membership client: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Amenity memberships from {} (timeout: {}s, concurrency: {})",
        config.api_base_url(),
        config.membership_timeout,
        config.membership_concurrency
    );

    let search = web::Data::new(PlaceSearch::new(
        storage.clone(),
        membership,
        config.membership_concurrency,
    ));

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state (storage and search resolver)
            .app_data(web::Data::from(storage.clone()))
            .app_data(search.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .service(
                web::scope("/api/v1")
                    .configure(handlers::health_config)
                    .configure(handlers::places_config),
            )
    })
    .bind(&server_addr)?
    .run()
    .await
}
