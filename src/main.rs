#[macro_use]
extern crate diesel;

mod admin;
mod booking;
mod catalog;
mod config;
mod database;
mod models;
mod protocol;
mod schema;
mod utils;

use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use chrono::Utc;
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use serde_json::json;

use crate::config::AppConfig;

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

#[get("/api/config")]
async fn view_config(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(config.get_ref())
}

#[get("/api/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": crate::utils::format_time_str(&Utc::now().naive_utc()),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let conn_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not found");
    let manager = ConnectionManager::<MysqlConnection>::new(conn_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    let config = AppConfig::from_env();

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .data(pool.clone())
            .data(config.clone())
            .service(view_config)
            .service(health)
            // catalog administration: platforms, games, rentals, bookings
            .service(
                web::scope("/api/admin")
                    .configure(admin::config),
            )
            // public catalog: search, browse, rent
            .service(
                web::scope("/api/catalog")
                    .configure(catalog::config),
            )
            // gaming area reservations
            .service(
                web::scope("/api/gaming-area")
                    .configure(booking::config),
            )
    })
    .bind(bind)?
    .run()
    .await
}
