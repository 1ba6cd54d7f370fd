use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer, Responder, get};
use std::sync::Arc;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod service;
mod utils;

use config::Config;
use db::init_db;
use error::{json_error_handler, query_error_handler};
use repository::AttendanceRepository;
use repository::mysql::MySqlAttendanceRepository;
use routes::RateLimits;

use tracing::info;
use tracing_appender::rolling;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance service is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        addr = %config.server_addr,
        strict_punch_in = config.strict_punch_in,
        "Server starting..."
    );

    let pool = init_db(&config.database_url, config.db_max_connections).await?;
    let repo: Arc<dyn AttendanceRepository> = Arc::new(MySqlAttendanceRepository::new(pool));
    let limits = Arc::new(RateLimits::from_config(&config)?);

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(docs::configure)
            .app_data(Data::from(repo.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config, &limits))
    })
    .bind(server_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
