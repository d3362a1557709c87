use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::delete_notification::{APIResponse, PathParams};
use beacon_domain::{Notification, ID};
use beacon_infra::BeaconContext;

pub async fn delete_notification_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = DeleteNotificationUseCase {
        owner_id: session.owner_id,
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(|e| match e {
            UseCaseError::NotFound(id) => BeaconError::NotFound(format!(
                "The notification with id: {}, was not found.",
                id
            )),
        })
}

#[derive(Debug)]
pub struct DeleteNotificationUseCase {
    pub owner_id: ID,
    pub notification_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteNotificationUseCase {
    type Response = Notification;

    type Errors = UseCaseError;

    const NAME: &'static str = "DeleteNotification";

    /// Reminders the notification was produced from are left untouched
    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .notifications
            .delete(&self.notification_id, &self.owner_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))
    }
}
