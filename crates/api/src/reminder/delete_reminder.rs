use super::find_owned_reminder;
use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::delete_reminder::{APIResponse, PathParams};
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;

pub async fn delete_reminder_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = DeleteReminderUseCase {
        owner_id: session.owner_id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(|e| match e {
            UseCaseError::NotFound(id) => BeaconError::NotFound(format!(
                "The reminder with id: {}, was not found.",
                id
            )),
        })
}

/// Deleting a reminder cancels its future firings. Notifications that were
/// already delivered are kept.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let not_found = || UseCaseError::NotFound(self.reminder_id.clone());
        let reminder = find_owned_reminder(ctx, &self.reminder_id, &self.owner_id)
            .await
            .ok_or_else(not_found)?;

        ctx.repos
            .reminders
            .delete(&reminder.id)
            .await
            .ok_or_else(not_found)
    }
}
