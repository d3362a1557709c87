use super::find_owned_reminder;
use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::complete_reminder::{APIResponse, PathParams};
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;

pub async fn complete_reminder_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = CompleteReminderUseCase {
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

#[derive(Debug)]
pub struct CompleteReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "CompleteReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = find_owned_reminder(ctx, &self.reminder_id, &self.owner_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;
        if reminder.is_completed {
            return Ok(reminder);
        }

        reminder.complete(ctx.sys.get_timestamp_millis());
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_infra::ManualSys;
    use std::sync::Arc;

    #[actix_web::main]
    #[test]
    async fn completing_twice_keeps_first_completion() {
        let mut ctx = BeaconContext::create_inmemory();
        let sys = Arc::new(ManualSys::new(100));
        ctx.sys = sys.clone();
        let owner_id = ID::default();
        let reminder = Reminder::new(owner_id.clone(), "Pay rent".into(), 50, 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = CompleteReminderUseCase {
            owner_id: owner_id.clone(),
            reminder_id: reminder.id.clone(),
        };
        let first = usecase.execute(&ctx).await.unwrap();
        assert!(first.is_completed);
        assert_eq!(first.completed_at, Some(100));

        sys.advance(1000);
        let second = usecase.execute(&ctx).await.unwrap();
        assert_eq!(second.completed_at, Some(100));
    }
}
