use super::notify::{NotifyOutcome, NotifyUseCase, UseCaseError};
use crate::{
    error::BeaconError,
    shared::{auth::protect_producer_route, usecase::execute},
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::create_notification::{APIResponse, RequestBody};
use beacon_domain::Notification;
use beacon_infra::BeaconContext;

fn handle_error(e: UseCaseError) -> BeaconError {
    match e {
        UseCaseError::StorageError => BeaconError::InternalError,
    }
}

/// Ingress for the producing subsystems
pub async fn create_notification_controller(
    http_req: actix_web::HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    protect_producer_route(&http_req, &ctx)?;

    let body = body.0;
    if body.title.trim().is_empty() {
        return Err(BeaconError::BadClientData(
            "A notification needs a title".into(),
        ));
    }
    let tag = match body.tag {
        Some(tag) if !tag.trim().is_empty() => tag,
        _ => Notification::default_tag(body.notification_type, body.entity_id.as_deref()),
    };

    let usecase = NotifyUseCase {
        owner_id: body.owner_id,
        notification_type: body.notification_type,
        tag,
        title: body.title,
        body: body.body,
        priority: body.priority.unwrap_or_default(),
        action_url: body.action_url,
        channels: body.channels,
    };

    execute(usecase, &ctx)
        .await
        .map(|outcome| match outcome {
            NotifyOutcome::Suppressed => HttpResponse::Ok().json(APIResponse::new(None)),
            stored => HttpResponse::Created().json(APIResponse::new(stored.notification())),
        })
        .map_err(handle_error)
}
