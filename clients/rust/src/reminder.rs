use crate::{APIResponse, BaseClient, ID};
use beacon_api_structs::*;
use beacon_domain::{ReminderStatus, SnoozePreset};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub type CreateReminderInput = create_reminder::RequestBody;
pub type UpdateReminderInput = update_reminder::RequestBody;

pub enum SnoozeInput {
    Until(i64),
    Preset(SnoozePreset),
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateReminderInput) -> APIResponse<create_reminder::APIResponse> {
        self.base
            .post(input, "reminders".into(), StatusCode::CREATED)
            .await
    }

    /// Creates a reminder on behalf of a user, requires a producer api key
    pub async fn create_for(
        &self,
        owner_id: &ID,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder_admin::APIResponse> {
        self.base
            .post(
                input,
                format!("user/{}/reminders", owner_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get(&self, reminder_id: &ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self, status: Option<ReminderStatus>) -> APIResponse<get_reminders::APIResponse> {
        let path = match status {
            Some(ReminderStatus::Pending) => "reminders?status=pending".into(),
            Some(ReminderStatus::Completed) => "reminders?status=completed".into(),
            Some(ReminderStatus::All) => "reminders?status=all".into(),
            None => "reminders".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn update(
        &self,
        reminder_id: &ID,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        self.base
            .put(input, format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, reminder_id: &ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn complete(&self, reminder_id: &ID) -> APIResponse<complete_reminder::APIResponse> {
        self.base
            .post(
                (),
                format!("reminders/{}/complete", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn reopen(&self, reminder_id: &ID) -> APIResponse<reopen_reminder::APIResponse> {
        self.base
            .post(
                (),
                format!("reminders/{}/reopen", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn snooze(
        &self,
        reminder_id: &ID,
        input: SnoozeInput,
    ) -> APIResponse<snooze_reminder::APIResponse> {
        let body = match input {
            SnoozeInput::Until(until) => snooze_reminder::RequestBody {
                until: Some(until),
                preset: None,
            },
            SnoozeInput::Preset(preset) => snooze_reminder::RequestBody {
                until: None,
                preset: Some(preset),
            },
        };
        self.base
            .post(
                body,
                format!("reminders/{}/snooze", reminder_id),
                StatusCode::OK,
            )
            .await
    }
}
