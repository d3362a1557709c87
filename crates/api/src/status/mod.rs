use actix_web::{web, HttpResponse};
use beacon_api_structs::get_service_health::*;

async fn status_controller() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Beacon is up and delivering".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status_controller));
}
