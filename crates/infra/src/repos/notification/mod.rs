mod inmemory;
mod postgres;

use beacon_domain::{Notification, ID};
pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    /// Inserts the notification unless the owner already has an unread one
    /// with the same tag, in which case the content of that one is replaced.
    /// Returns what ended up being stored.
    async fn upsert_unread(&self, notification: &Notification) -> anyhow::Result<Notification>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    /// Newest first
    async fn find_by_owner(&self, owner_id: &ID, limit: usize)
        -> anyhow::Result<Vec<Notification>>;
    async fn count_unread(&self, owner_id: &ID) -> anyhow::Result<i64>;
    async fn mark_read(
        &self,
        notification_id: &ID,
        owner_id: &ID,
    ) -> anyhow::Result<Option<Notification>>;
    /// Returns how many notifications went from unread to read
    async fn mark_all_read(&self, owner_id: &ID) -> anyhow::Result<u64>;
    async fn delete(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification>;
}
