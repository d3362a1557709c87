mod add_push_subscription;
mod remove_push_subscription;

use actix_web::web;
use add_push_subscription::add_push_subscription_controller;
use remove_push_subscription::remove_push_subscription_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/push-subscriptions",
        web::post().to(add_push_subscription_controller),
    );
    cfg.route(
        "/push-subscriptions",
        web::delete().to(remove_push_subscription_controller),
    );
}
