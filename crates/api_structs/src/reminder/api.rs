use crate::dtos::ReminderDTO;
use beacon_domain::{Channel, Reminder, ReminderStatus, RepeatType, SnoozePreset, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

#[derive(Deserialize)]
pub struct ReminderPathParams {
    pub reminder_id: ID,
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        pub remind_at: i64,
        #[serde(default)]
        pub repeat_type: Option<RepeatType>,
        #[serde(default)]
        pub notify_via: Option<Vec<Channel>>,
        #[serde(default)]
        pub entity_id: Option<String>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod create_reminder_admin {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub owner_id: ID,
    }

    pub type RequestBody = super::create_reminder::RequestBody;

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub status: Option<ReminderStatus>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub remind_at: Option<i64>,
        #[serde(default)]
        pub repeat_type: Option<RepeatType>,
        #[serde(default)]
        pub notify_via: Option<Vec<Channel>>,
        #[serde(default)]
        pub entity_id: Option<String>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod complete_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod reopen_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod snooze_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    /// Either an explicit `until` timestamp or one of the presets
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub until: Option<i64>,
        #[serde(default)]
        pub preset: Option<SnoozePreset>,
    }

    pub type APIResponse = ReminderResponse;
}
