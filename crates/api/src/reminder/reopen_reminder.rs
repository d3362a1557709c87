use super::find_owned_reminder;
use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::reopen_reminder::{APIResponse, PathParams};
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;

pub async fn reopen_reminder_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = ReopenReminderUseCase {
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
            UseCaseError::StorageError => BeaconError::InternalError,
        })
}

/// A reopened reminder that is already due fires again on the next tick
#[derive(Debug)]
pub struct ReopenReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReopenReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "ReopenReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = find_owned_reminder(ctx, &self.reminder_id, &self.owner_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;
        if !reminder.is_completed {
            return Ok(reminder);
        }

        reminder.reopen(ctx.sys.get_timestamp_millis());
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .reminders
            .release_firing(&reminder.id, reminder.trigger_at())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
