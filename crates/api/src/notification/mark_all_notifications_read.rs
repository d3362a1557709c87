use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::mark_all_notifications_read::APIResponse;
use beacon_domain::ID;
use beacon_infra::BeaconContext;

pub async fn mark_all_notifications_read_controller(
    http_req: actix_web::HttpRequest,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = MarkAllNotificationsReadUseCase {
        owner_id: session.owner_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|updated_count| HttpResponse::Ok().json(APIResponse { updated_count }))
        .map_err(|e| match e {
            UseCaseError::StorageError => BeaconError::InternalError,
        })
}

#[derive(Debug)]
pub struct MarkAllNotificationsReadUseCase {
    pub owner_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkAllNotificationsReadUseCase {
    /// How many notifications were unread
    type Response = u64;

    type Errors = UseCaseError;

    const NAME: &'static str = "MarkAllNotificationsRead";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .notifications
            .mark_all_read(&self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
