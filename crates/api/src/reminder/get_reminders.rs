use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::get_reminders::{APIResponse, QueryParams};
use beacon_domain::{Reminder, ReminderStatus, ID};
use beacon_infra::BeaconContext;

pub async fn get_reminders_controller(
    http_req: actix_web::HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = GetRemindersUseCase {
        owner_id: session.owner_id,
        status: query_params.status.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|e| match e {
            UseCaseError::StorageError => BeaconError::InternalError,
        })
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub owner_id: ID,
    pub status: ReminderStatus,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .reminders
            .find_by_owner(&self.owner_id, self.status)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
