mod inmemory;
mod postgres;

use beacon_domain::{Reminder, ReminderStatus, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Sorted by `remind_at` ascending
    async fn find_by_owner(
        &self,
        owner_id: &ID,
        status: ReminderStatus,
    ) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Due reminders whose current trigger has not been fired yet
    async fn find_due(&self, now: i64, limit: usize) -> anyhow::Result<Vec<Reminder>>;
    /// Claims the exclusive right to fire the instance of `reminder_id`
    /// triggered at `trigger_at`. Only one caller ever gets `true`.
    async fn claim_firing(
        &self,
        reminder_id: &ID,
        trigger_at: i64,
        now: i64,
    ) -> anyhow::Result<bool>;
    /// Gives up a claim so that the instance can be fired again
    async fn release_firing(&self, reminder_id: &ID, trigger_at: i64) -> anyhow::Result<()>;
    /// Stores a recurring reminder that was moved to its next occurrence, as long
    /// as nobody else moved it away from `expected_remind_at` in the meantime.
    /// Claims of occurrences before `expected_remind_at` are dropped.
    async fn advance(&self, reminder: &Reminder, expected_remind_at: i64) -> anyhow::Result<bool>;
}
