use beacon_domain::{Notification, ID};
use tokio::sync::broadcast;
use tracing::debug;

const HUB_CAPACITY: usize = 256;

/// In process fan out of notifications to connected browser sessions
pub struct InAppHub {
    sender: broadcast::Sender<Notification>,
}

impl InAppHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(HUB_CAPACITY);
        Self { sender }
    }

    /// Returns how many listeners received it. Nobody listening is fine.
    pub fn publish(&self, notification: &Notification) -> usize {
        match self.sender.send(notification.clone()) {
            Ok(listeners) => listeners,
            Err(_) => {
                debug!(
                    "No in app listeners for notification: {}",
                    notification.id
                );
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Waits for the next notification addressed to `owner_id`.
    /// `None` when the hub is gone.
    pub async fn next_for(
        receiver: &mut broadcast::Receiver<Notification>,
        owner_id: &ID,
    ) -> Option<Notification> {
        loop {
            match receiver.recv().await {
                Ok(notification) if notification.owner_id == *owner_id => {
                    return Some(notification)
                }
                Ok(_) => continue,
                // A slow listener skips what it missed, the list endpoint has it
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Default for InAppHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_domain::{NotificationType, Priority};

    fn notification(owner_id: &ID) -> Notification {
        Notification {
            id: ID::default(),
            owner_id: owner_id.clone(),
            tag: "post-published:9".into(),
            notification_type: NotificationType::PostPublished,
            title: "Published".into(),
            body: "Your post is live".into(),
            priority: Priority::Normal,
            action_url: None,
            is_read: false,
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn publish_without_listeners_is_fine() {
        let hub = InAppHub::new();
        assert_eq!(hub.publish(&notification(&ID::default())), 0);
    }

    #[tokio::test]
    async fn listeners_only_see_their_own() {
        let hub = InAppHub::new();
        let owner_id = ID::default();
        let mut receiver = hub.subscribe();
        hub.publish(&notification(&ID::default()));
        let mine = notification(&owner_id);
        hub.publish(&mine);
        let received = InAppHub::next_for(&mut receiver, &owner_id).await;
        assert_eq!(received, Some(mine));
    }
}
