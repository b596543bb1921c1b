#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server binary for the theft panel frontend.

use std::path::Path;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use theft_watch_dataset::Dataset;
use theft_watch_server::{AppState, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    log::info!("Loading dataset from {data_dir}...");
    let dataset = Dataset::load(Path::new(&data_dir)).expect("Failed to load dataset");

    let state = web::Data::new(AppState { dataset });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/months", web::get().to(handlers::months))
                    .route("/areas", web::get().to(handlers::areas))
                    .route("/panel", web::get().to(handlers::panel))
                    .route("/compare", web::get().to(handlers::compare))
                    .route("/top", web::get().to(handlers::top)),
            )
            // Serve the raw data resources
            .service(Files::new("/data", data_dir.clone()))
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
