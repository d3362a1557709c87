use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use beacon_domain::{Notification, ID};
use std::sync::Mutex;

pub struct InMemoryNotificationRepo {
    notifications: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn upsert_unread(&self, notification: &Notification) -> anyhow::Result<Notification> {
        let stored = upsert_by(
            notification,
            &self.notifications,
            |n| n.owner_id == notification.owner_id && n.tag == notification.tag && !n.is_read,
            |existing| {
                existing.notification_type = notification.notification_type;
                existing.title = notification.title.clone();
                existing.body = notification.body.clone();
                existing.priority = notification.priority;
                existing.action_url = notification.action_url.clone();
                existing.created_at = notification.created_at;
            },
        );
        Ok(stored)
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_owner(
        &self,
        owner_id: &ID,
        limit: usize,
    ) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| n.owner_id == *owner_id);
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(limit);
        Ok(notifications)
    }

    async fn count_unread(&self, owner_id: &ID) -> anyhow::Result<i64> {
        let unread = find_by(&self.notifications, |n| n.owner_id == *owner_id && !n.is_read);
        Ok(unread.len() as i64)
    }

    async fn mark_read(
        &self,
        notification_id: &ID,
        owner_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        update_many(
            &self.notifications,
            |n| n.id == *notification_id && n.owner_id == *owner_id,
            |n| n.mark_read(),
        );
        Ok(find_by(&self.notifications, |n| {
            n.id == *notification_id && n.owner_id == *owner_id
        })
        .pop())
    }

    async fn mark_all_read(&self, owner_id: &ID) -> anyhow::Result<u64> {
        Ok(update_many(
            &self.notifications,
            |n| n.owner_id == *owner_id && !n.is_read,
            |n| n.mark_read(),
        ))
    }

    async fn delete(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification> {
        find_and_delete_by(&self.notifications, |n| {
            n.id == *notification_id && n.owner_id == *owner_id
        })
        .pop()
    }
}
