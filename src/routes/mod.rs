use actix_web::{guard, web};
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::utils::webutils::validate_admin_token;

pub mod health;
pub mod invite;
pub mod team;
pub mod user;
pub mod vacation;

/// Mounts every route. Expects `Data<Arc<DbService>>`, `Data<Validator>` and
/// `Data<EnvConfig>` to be registered on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let admin_auth = HttpAuthentication::bearer(validate_admin_token);

    cfg.service(web::scope("/health").service(health::health));
    cfg.service(web::scope("/register").service(user::register));
    cfg.service(
        web::scope("/teams")
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .route(web::post().to(team::create_team))
                    .wrap(admin_auth),
            )
            .service(team::list_teams)
            .service(team::add_user)
            .service(team::get_team)
            .service(team::team_users)
            .service(team::remove_user),
    );
    cfg.service(
        web::scope("/invites")
            .service(invite::create_invite)
            .service(invite::invites_from)
            .service(invite::invites_to)
            .service(invite::get_invite)
            .service(invite::approve_invite)
            .service(invite::decline_invite),
    );
    cfg.service(
        web::scope("/vacations")
            .service(vacation::create_request)
            .service(vacation::update_approval)
            .service(vacation::requests_to)
            .service(vacation::requests_from)
            .service(vacation::approvals),
    );
}
