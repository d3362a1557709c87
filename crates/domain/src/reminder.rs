use crate::{
    preference::Channel,
    shared::entity::{Entity, Owned, ID},
};
use chrono::{Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

const MINUTE_MILLIS: i64 = 1000 * 60;
const HOUR_MILLIS: i64 = MINUTE_MILLIS * 60;
const DAY_MILLIS: i64 = HOUR_MILLIS * 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Default for RepeatType {
    fn default() -> Self {
        Self::None
    }
}

impl RepeatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// The occurrence following `remind_at`. Months are calendar months,
    /// so the 31st of January is followed by the last day of February.
    pub fn next_occurrence(&self, remind_at: i64) -> Option<i64> {
        match self {
            Self::None => None,
            Self::Daily => Some(remind_at + DAY_MILLIS),
            Self::Weekly => Some(remind_at + 7 * DAY_MILLIS),
            Self::Monthly => Utc
                .timestamp_millis_opt(remind_at)
                .single()
                .and_then(|dt| dt.checked_add_months(Months::new(1)))
                .map(|dt| dt.timestamp_millis()),
        }
    }
}

impl FromStr for RepeatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown repeat type: {}", s)),
        }
    }
}

/// Filter for listing the reminders of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Completed,
    All,
}

impl Default for ReminderStatus {
    fn default() -> Self {
        Self::All
    }
}

impl ReminderStatus {
    pub fn matches(&self, reminder: &Reminder) -> bool {
        match self {
            Self::Pending => !reminder.is_completed,
            Self::Completed => reminder.is_completed,
            Self::All => true,
        }
    }
}

/// The snooze durations offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnoozePreset {
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "3h")]
    ThreeHours,
    #[serde(rename = "1d")]
    OneDay,
}

static SNOOZE_PRESETS: [(SnoozePreset, &str, i64); 4] = [
    (SnoozePreset::FifteenMinutes, "15 minutes", 15 * MINUTE_MILLIS),
    (SnoozePreset::OneHour, "1 hour", HOUR_MILLIS),
    (SnoozePreset::ThreeHours, "3 hours", 3 * HOUR_MILLIS),
    (SnoozePreset::OneDay, "Tomorrow", DAY_MILLIS),
];

impl SnoozePreset {
    pub fn duration_millis(&self) -> i64 {
        SNOOZE_PRESETS
            .iter()
            .find(|(p, ..)| p == self)
            .map(|(_, _, millis)| *millis)
            .unwrap_or(HOUR_MILLIS)
    }

    pub fn label(&self) -> &'static str {
        SNOOZE_PRESETS
            .iter()
            .find(|(p, ..)| p == self)
            .map(|(_, label, _)| *label)
            .unwrap_or("1 hour")
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SnoozeError {
    #[error("Snooze time: {0} is not in the future")]
    NotInFuture(i64),
    #[error("A completed reminder cannot be snoozed")]
    Completed,
}

/// A `Reminder` is a point in time at which its owner wants to be notified,
/// optionally repeating.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub owner_id: ID,
    /// Optional entity this `Reminder` is about, e.g. a client or a bill
    pub entity_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub remind_at: i64,
    pub repeat_type: RepeatType,
    /// Channels this `Reminder` should be delivered through
    pub notify_via: Vec<Channel>,
    pub is_completed: bool,
    pub completed_at: Option<i64>,
    pub is_snoozed: bool,
    pub snoozed_until: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Reminder {
    pub fn new(owner_id: ID, title: String, remind_at: i64, now: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            entity_id: None,
            title,
            description: None,
            remind_at,
            repeat_type: RepeatType::None,
            notify_via: vec![Channel::Push, Channel::Browser],
            is_completed: false,
            completed_at: None,
            is_snoozed: false,
            snoozed_until: None,
            created: now,
            updated: now,
        }
    }

    /// `remind_at <= now AND NOT is_completed AND (NOT is_snoozed OR snoozed_until <= now)`
    pub fn is_due(&self, now: i64) -> bool {
        if self.is_completed || self.remind_at > now {
            return false;
        }
        match (self.is_snoozed, self.snoozed_until) {
            (true, Some(until)) => until <= now,
            _ => true,
        }
    }

    /// The point in time the current due instance was triggered at.
    /// A snoozed reminder is triggered again when the snooze ends.
    pub fn trigger_at(&self) -> i64 {
        match (self.is_snoozed, self.snoozed_until) {
            (true, Some(until)) => until.max(self.remind_at),
            _ => self.remind_at,
        }
    }

    /// Dedupe tag of the current occurrence
    pub fn notification_tag(&self) -> String {
        format!("reminder:{}:{}", self.id, self.remind_at)
    }

    /// Moves a repeating reminder to its next occurrence, counted from the
    /// current `remind_at`. Returns `false` for non repeating reminders.
    pub fn advance(&mut self, now: i64) -> bool {
        match self.repeat_type.next_occurrence(self.remind_at) {
            Some(next) => {
                self.remind_at = next;
                self.is_completed = false;
                self.completed_at = None;
                self.is_snoozed = false;
                self.snoozed_until = None;
                self.updated = now;
                true
            }
            None => false,
        }
    }

    pub fn complete(&mut self, now: i64) {
        if self.is_completed {
            return;
        }
        self.is_completed = true;
        self.completed_at = Some(now);
        self.updated = now;
    }

    pub fn reopen(&mut self, now: i64) {
        self.is_completed = false;
        self.completed_at = None;
        self.updated = now;
    }

    pub fn snooze(&mut self, until: i64, now: i64) -> Result<(), SnoozeError> {
        if self.is_completed {
            return Err(SnoozeError::Completed);
        }
        if until <= now {
            return Err(SnoozeError::NotInFuture(until));
        }
        self.is_snoozed = true;
        self.snoozed_until = Some(until);
        self.updated = now;
        Ok(())
    }

    /// Rescheduling drops any running snooze
    pub fn reschedule(&mut self, remind_at: i64, now: i64) {
        self.remind_at = remind_at;
        self.is_snoozed = false;
        self.snoozed_until = None;
        self.updated = now;
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for Reminder {
    fn owner_id(&self) -> &ID {
        &self.owner_id
    }
}
