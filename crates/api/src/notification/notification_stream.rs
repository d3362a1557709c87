use crate::{
    error::BeaconError,
    shared::auth::{protect_route, session_from_token, Session},
};
use actix_web::{http::header, web, HttpResponse};
use beacon_api_structs::dtos::NotificationDTO;
use beacon_infra::{BeaconContext, InAppHub};
use futures::stream;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
pub struct QueryParams {
    /// Browsers can not set headers on an `EventSource`
    access_token: Option<String>,
}

fn authenticate(
    http_req: &actix_web::HttpRequest,
    query_params: &QueryParams,
    ctx: &BeaconContext,
) -> Result<Session, BeaconError> {
    match &query_params.access_token {
        Some(token) => session_from_token(token, ctx),
        None => protect_route(http_req, ctx),
    }
}

fn as_event(dto: &NotificationDTO) -> Result<web::Bytes, serde_json::Error> {
    let data = serde_json::to_string(dto)?;
    Ok(web::Bytes::from(format!(
        "event: notification\ndata: {}\n\n",
        data
    )))
}

/// Server sent events with every notification dispatched to the browser
/// channel of the session owner
pub async fn notification_stream_controller(
    http_req: actix_web::HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = authenticate(&http_req, &query_params, &ctx)?;
    debug!("Opening notification stream for: {}", session.owner_id);

    let receiver = ctx.services.in_app.subscribe();
    let events = stream::unfold(
        (receiver, session.owner_id),
        |(mut receiver, owner_id)| async move {
            let notification = InAppHub::next_for(&mut receiver, &owner_id).await?;
            let event = as_event(&NotificationDTO::new(notification));
            Some((event, (receiver, owner_id)))
        },
    );

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        // Keeps the compress middleware off the event stream
        .insert_header((header::CONTENT_ENCODING, "identity"))
        .streaming(events))
}
