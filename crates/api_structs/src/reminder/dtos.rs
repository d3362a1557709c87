use beacon_domain::{Channel, Reminder, RepeatType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner_id: ID,
    pub entity_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub remind_at: i64,
    pub repeat_type: RepeatType,
    pub notify_via: Vec<Channel>,
    pub is_completed: bool,
    pub completed_at: Option<i64>,
    pub is_snoozed: bool,
    pub snoozed_until: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            owner_id: reminder.owner_id,
            entity_id: reminder.entity_id,
            title: reminder.title,
            description: reminder.description,
            remind_at: reminder.remind_at,
            repeat_type: reminder.repeat_type,
            notify_via: reminder.notify_via,
            is_completed: reminder.is_completed,
            completed_at: reminder.completed_at,
            is_snoozed: reminder.is_snoozed,
            snoozed_until: reminder.snoozed_until,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
