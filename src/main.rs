use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};

use holiday_planner::config::EnvConfig;
use holiday_planner::db::service::DbService;
use holiday_planner::routes::configure_routes;
use holiday_planner::types::validate::Validator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    let addr = format!("0.0.0.0:{}", config.port);

    let db_service = DbService::new(&config.db_url)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
        .with_transition_policy(config.transition_policy);
    let db_service = Arc::new(db_service);
    let validator = Validator::default();

    info!(
        "Starting server on {} (transition policy: {})",
        addr, config.transition_policy
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(validator.clone()))
            .app_data(web::Data::new(Arc::clone(&db_service)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
