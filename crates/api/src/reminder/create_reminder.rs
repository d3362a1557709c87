use crate::{
    error::BeaconError,
    shared::{
        auth::{protect_producer_route, protect_route},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::create_reminder::{APIResponse, RequestBody};
use beacon_api_structs::create_reminder_admin::PathParams;
use beacon_domain::{Channel, Reminder, RepeatType, ID};
use beacon_infra::BeaconContext;

fn handle_error(e: UseCaseError) -> BeaconError {
    match e {
        UseCaseError::InvalidTitle => {
            BeaconError::BadClientData("A reminder needs a non empty title".into())
        }
        UseCaseError::StorageError => BeaconError::InternalError,
    }
}

fn usecase_from_body(owner_id: ID, body: RequestBody) -> CreateReminderUseCase {
    CreateReminderUseCase {
        owner_id,
        title: body.title,
        description: body.description,
        remind_at: body.remind_at,
        repeat_type: body.repeat_type.unwrap_or_default(),
        notify_via: body.notify_via,
        entity_id: body.entity_id,
    }
}

pub async fn create_reminder_controller(
    http_req: actix_web::HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    execute(usecase_from_body(session.owner_id, body.0), &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(handle_error)
}

/// Producers, e.g. the bill due evaluator, create reminders for a user
pub async fn create_reminder_admin_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    protect_producer_route(&http_req, &ctx)?;

    execute(
        usecase_from_body(path_params.owner_id.clone(), body.0),
        &ctx,
    )
    .await
    .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
    .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub remind_at: i64,
    pub repeat_type: RepeatType,
    pub notify_via: Option<Vec<Channel>>,
    pub entity_id: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTitle,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidTitle);
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut reminder = Reminder::new(
            self.owner_id.clone(),
            self.title.clone(),
            self.remind_at,
            now,
        );
        reminder.description = self.description.clone();
        reminder.repeat_type = self.repeat_type;
        reminder.entity_id = self.entity_id.clone();
        if let Some(notify_via) = &self.notify_via {
            reminder.notify_via = notify_via.clone();
        }

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}
