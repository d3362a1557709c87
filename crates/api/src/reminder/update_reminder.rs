use super::find_owned_reminder;
use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use beacon_domain::{Channel, Reminder, RepeatType, ID};
use beacon_infra::BeaconContext;

fn handle_error(e: UseCaseError) -> BeaconError {
    match e {
        UseCaseError::NotFound(id) => {
            BeaconError::NotFound(format!("The reminder with id: {}, was not found.", id))
        }
        UseCaseError::InvalidTitle => {
            BeaconError::BadClientData("A reminder needs a non empty title".into())
        }
        UseCaseError::StorageError => BeaconError::InternalError,
    }
}

pub async fn update_reminder_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        owner_id: session.owner_id,
        reminder_id: path_params.reminder_id.clone(),
        title: body.title,
        description: body.description,
        remind_at: body.remind_at,
        repeat_type: body.repeat_type,
        notify_via: body.notify_via,
        entity_id: body.entity_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub remind_at: Option<i64>,
    pub repeat_type: Option<RepeatType>,
    pub notify_via: Option<Vec<Channel>>,
    pub entity_id: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTitle,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = find_owned_reminder(ctx, &self.reminder_id, &self.owner_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;
        let now = ctx.sys.get_timestamp_millis();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(UseCaseError::InvalidTitle);
            }
            reminder.title = title.clone();
        }
        if let Some(description) = &self.description {
            reminder.description = Some(description.clone());
        }
        if let Some(entity_id) = &self.entity_id {
            reminder.entity_id = Some(entity_id.clone());
        }
        if let Some(repeat_type) = self.repeat_type {
            reminder.repeat_type = repeat_type;
        }
        if let Some(notify_via) = &self.notify_via {
            reminder.notify_via = notify_via.clone();
        }
        let rescheduled = match self.remind_at {
            Some(remind_at) if remind_at != reminder.remind_at => {
                reminder.reschedule(remind_at, now);
                true
            }
            _ => {
                reminder.updated = now;
                false
            }
        };

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if rescheduled {
            // A moved reminder may land on an instance that already fired
            ctx.repos
                .reminders
                .release_firing(&reminder.id, reminder.trigger_at())
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::send_due_reminders::SendDueRemindersUseCase;
    use beacon_infra::ManualSys;
    use std::sync::Arc;

    fn update(owner_id: &ID, reminder_id: &ID) -> UpdateReminderUseCase {
        UpdateReminderUseCase {
            owner_id: owner_id.clone(),
            reminder_id: reminder_id.clone(),
            title: None,
            description: None,
            remind_at: None,
            repeat_type: None,
            notify_via: None,
            entity_id: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn moving_remind_at_clears_snooze() {
        let mut ctx = BeaconContext::create_inmemory();
        ctx.sys = Arc::new(ManualSys::new(100));
        let owner_id = ID::default();
        let mut reminder = Reminder::new(owner_id.clone(), "Renew domain".into(), 50, 0);
        reminder.snooze(1000, 60).unwrap();
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = update(&owner_id, &reminder.id);
        usecase.remind_at = Some(5000);
        usecase.repeat_type = Some(RepeatType::Monthly);
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.remind_at, 5000);
        assert_eq!(updated.repeat_type, RepeatType::Monthly);
        assert!(!updated.is_snoozed);
        assert_eq!(updated.snoozed_until, None);
        assert_eq!(updated.title, "Renew domain");
    }

    #[actix_web::main]
    #[test]
    async fn moving_back_to_a_fired_time_fires_again() {
        const HOUR: i64 = 1000 * 60 * 60;
        let now = 100 * HOUR;
        let mut ctx = BeaconContext::create_inmemory();
        let sys = Arc::new(ManualSys::new(now));
        ctx.sys = sys.clone();
        let owner_id = ID::default();
        let reminder = Reminder::new(owner_id.clone(), "Renew domain".into(), now, 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let tick = || execute(SendDueRemindersUseCase::default(), &ctx);
        assert_eq!(tick().await.unwrap().fired, 1);
        let fired = ctx.repos.notifications.find_by_owner(&owner_id, 10).await.unwrap();
        ctx.repos
            .notifications
            .mark_read(&fired[0].id, &owner_id)
            .await
            .unwrap();

        let mut later = update(&owner_id, &reminder.id);
        later.remind_at = Some(now + HOUR);
        later.execute(&ctx).await.unwrap();
        let mut back = update(&owner_id, &reminder.id);
        back.remind_at = Some(now);
        back.execute(&ctx).await.unwrap();

        sys.advance(2 * HOUR);
        assert_eq!(tick().await.unwrap().fired, 1);
        assert_eq!(ctx.repos.notifications.count_unread(&owner_id).await.unwrap(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn only_owner_can_update() {
        let ctx = BeaconContext::create_inmemory();
        let reminder = Reminder::new(ID::default(), "Renew domain".into(), 50, 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = update(&ID::default(), &reminder.id);
        usecase.title = Some("Hijacked".into());
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(reminder.id.clone())
        );
    }
}
