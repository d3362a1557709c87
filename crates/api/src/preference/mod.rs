mod get_preferences;
mod update_preferences;

use actix_web::web;
use get_preferences::get_preferences_controller;
use update_preferences::update_preferences_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/preferences",
        web::get().to(get_preferences_controller),
    );
    cfg.route(
        "/notifications/preferences",
        web::put().to(update_preferences_controller),
    );
}
