use actix_web::{web, App};
use std::sync::Arc;

use holiday_planner::config::EnvConfig;
use holiday_planner::db::service::DbService;
use holiday_planner::types::validate::Validator;
use holiday_planner::workflow::TransitionPolicy;

pub const ADMIN_KEY: &str = "test-admin-key";

pub fn test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "sqlite::memory:".to_string(),
        admin_key: ADMIN_KEY.to_string(),
        transition_policy: TransitionPolicy::Permissive,
    }
}

#[allow(dead_code)]
pub fn create_app(
    db: Arc<DbService>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(test_config()))
        .app_data(web::Data::new(Validator::default()))
        .app_data(web::Data::new(db))
        .configure(holiday_planner::routes::configure_routes)
}
