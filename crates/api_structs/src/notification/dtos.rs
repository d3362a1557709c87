use beacon_domain::{Notification, NotificationType, Priority, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub tag: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub created_at: i64,
    pub icon: String,
    pub color: String,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        let display = notification.notification_type.display();
        Self {
            id: notification.id,
            tag: notification.tag,
            notification_type: notification.notification_type,
            title: notification.title,
            body: notification.body,
            priority: notification.priority,
            action_url: notification.action_url,
            is_read: notification.is_read,
            created_at: notification.created_at,
            icon: display.icon.to_string(),
            color: display.color.to_string(),
        }
    }
}
