use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use beacon_domain::{Reminder, ReminderStatus, ID};
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct ReminderFiring {
    reminder_id: ID,
    trigger_at: i64,
}

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
    firings: Mutex<Vec<ReminderFiring>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            firings: Mutex::new(Vec::new()),
        }
    }

    fn is_fired(&self, reminder: &Reminder) -> bool {
        let trigger_at = reminder.trigger_at();
        !find_by(&self.firings, |f| {
            f.reminder_id == reminder.id && f.trigger_at == trigger_at
        })
        .is_empty()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_owner(
        &self,
        owner_id: &ID,
        status: ReminderStatus,
    ) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| {
            r.owner_id == *owner_id && status.matches(r)
        });
        reminders.sort_by_key(|r| r.remind_at);
        Ok(reminders)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let deleted = delete(reminder_id, &self.reminders);
        if deleted.is_some() {
            delete_by(&self.firings, |f| f.reminder_id == *reminder_id);
        }
        deleted
    }

    async fn find_due(&self, now: i64, limit: usize) -> anyhow::Result<Vec<Reminder>> {
        let mut due = find_by(&self.reminders, |r| r.is_due(now));
        due.retain(|r| !self.is_fired(r));
        due.sort_by_key(|r| r.remind_at);
        due.truncate(limit);
        Ok(due)
    }

    async fn claim_firing(
        &self,
        reminder_id: &ID,
        trigger_at: i64,
        _now: i64,
    ) -> anyhow::Result<bool> {
        let firing = ReminderFiring {
            reminder_id: reminder_id.clone(),
            trigger_at,
        };
        Ok(insert_if_absent(&firing, &self.firings, |f| {
            f.reminder_id == *reminder_id && f.trigger_at == trigger_at
        }))
    }

    async fn release_firing(&self, reminder_id: &ID, trigger_at: i64) -> anyhow::Result<()> {
        delete_by(&self.firings, |f| {
            f.reminder_id == *reminder_id && f.trigger_at == trigger_at
        });
        Ok(())
    }

    async fn advance(&self, reminder: &Reminder, expected_remind_at: i64) -> anyhow::Result<bool> {
        let updated = update_many(
            &self.reminders,
            |r| r.id == reminder.id && r.remind_at == expected_remind_at,
            |r| *r = reminder.clone(),
        );
        if updated != 1 {
            return Ok(false);
        }
        delete_by(&self.firings, |f| {
            f.reminder_id == reminder.id && f.trigger_at < expected_remind_at
        });
        Ok(true)
    }
}
