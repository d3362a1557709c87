use super::find_owned_reminder;
use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::snooze_reminder::{APIResponse, PathParams, RequestBody};
use beacon_domain::{Reminder, SnoozeError, SnoozePreset, ID};
use beacon_infra::BeaconContext;

fn handle_error(e: UseCaseError) -> BeaconError {
    match e {
        UseCaseError::NotFound(id) => {
            BeaconError::NotFound(format!("The reminder with id: {}, was not found.", id))
        }
        UseCaseError::MissingSnoozeTime => BeaconError::BadClientData(
            "Provide either `until` or one of the presets to snooze a reminder".into(),
        ),
        UseCaseError::InvalidSnooze(SnoozeError::Completed) => {
            BeaconError::Conflict(SnoozeError::Completed.to_string())
        }
        UseCaseError::InvalidSnooze(e) => BeaconError::BadClientData(e.to_string()),
        UseCaseError::StorageError => BeaconError::InternalError,
    }
}

pub async fn snooze_reminder_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = SnoozeReminderUseCase {
        owner_id: session.owner_id,
        reminder_id: path_params.reminder_id.clone(),
        until: body.until,
        preset: body.preset,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
    /// Takes precedence over `preset`
    pub until: Option<i64>,
    pub preset: Option<SnoozePreset>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    MissingSnoozeTime,
    InvalidSnooze(SnoozeError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let until = match (self.until, self.preset) {
            (Some(until), _) => until,
            (None, Some(preset)) => now + preset.duration_millis(),
            (None, None) => return Err(UseCaseError::MissingSnoozeTime),
        };

        let mut reminder = find_owned_reminder(ctx, &self.reminder_id, &self.owner_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;
        reminder
            .snooze(until, now)
            .map_err(UseCaseError::InvalidSnooze)?;

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

    const HOUR: i64 = 1000 * 60 * 60;

    struct TestContext {
        ctx: BeaconContext,
        reminder: Reminder,
    }

    async fn setup(now: i64) -> TestContext {
        let mut ctx = BeaconContext::create_inmemory();
        ctx.sys = Arc::new(ManualSys::new(now));
        let reminder = Reminder::new(ID::default(), "Send invoice".into(), now, 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        TestContext { ctx, reminder }
    }

    fn snooze(reminder: &Reminder) -> SnoozeReminderUseCase {
        SnoozeReminderUseCase {
            owner_id: reminder.owner_id.clone(),
            reminder_id: reminder.id.clone(),
            until: None,
            preset: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn snoozes_with_preset() {
        let now = 10 * HOUR;
        let TestContext { ctx, reminder } = setup(now).await;

        let mut usecase = snooze(&reminder);
        usecase.preset = Some(SnoozePreset::ThreeHours);
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.is_snoozed);
        assert_eq!(res.snoozed_until, Some(now + 3 * HOUR));
        assert!(!res.is_due(now + HOUR));
        assert!(res.is_due(now + 3 * HOUR));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_snooze_in_the_past() {
        let now = 10 * HOUR;
        let TestContext { ctx, reminder } = setup(now).await;

        let mut usecase = snooze(&reminder);
        usecase.until = Some(now);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidSnooze(SnoozeError::NotInFuture(now))
        );

        let mut usecase = snooze(&reminder);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::MissingSnoozeTime
        );
    }

    #[actix_web::main]
    #[test]
    async fn completed_reminder_can_not_be_snoozed() {
        let now = 10 * HOUR;
        let TestContext { ctx, mut reminder } = setup(now).await;
        reminder.complete(now);
        ctx.repos.reminders.save(&reminder).await.unwrap();

        let mut usecase = snooze(&reminder);
        usecase.until = Some(now + HOUR);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidSnooze(SnoozeError::Completed)
        );
    }
}
