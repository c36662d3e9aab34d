use actix_web::{dev::ServiceRequest, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::warn;

use crate::config::EnvConfig;
use crate::types::error::AppError;

/// Bearer check for admin-only routes. The key comes from the `EnvConfig` in app data.
pub async fn validate_admin_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let authorized = req
        .app_data::<web::Data<EnvConfig>>()
        .map(|config| !config.admin_key.is_empty() && credentials.token() == config.admin_key)
        .unwrap_or(false);

    if authorized {
        Ok(req)
    } else {
        warn!("Rejected admin request to {}", req.path());
        Err((AppError::Unauthorized.into(), req))
    }
}
