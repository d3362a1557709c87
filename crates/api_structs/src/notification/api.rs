use crate::dtos::NotificationDTO;
use beacon_domain::{Channel, Notification, NotificationType, Priority, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification: NotificationDTO::new(notification),
        }
    }
}

#[derive(Deserialize)]
pub struct NotificationPathParams {
    pub notification_id: ID,
}

pub mod get_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub limit: Option<usize>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
        pub unread_count: i64,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>, unread_count: i64) -> Self {
            Self {
                notifications: notifications
                    .into_iter()
                    .map(NotificationDTO::new)
                    .collect(),
                unread_count,
            }
        }
    }
}

pub mod mark_notification_read {
    use super::*;

    pub type PathParams = NotificationPathParams;

    pub type APIResponse = NotificationResponse;
}

pub mod mark_all_notifications_read {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub updated_count: u64,
    }
}

pub mod delete_notification {
    use super::*;

    pub type PathParams = NotificationPathParams;

    pub type APIResponse = NotificationResponse;
}

pub mod create_notification {
    use super::*;

    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub owner_id: ID,
        #[serde(rename = "type")]
        pub notification_type: NotificationType,
        #[serde(default)]
        pub tag: Option<String>,
        #[serde(default)]
        pub entity_id: Option<String>,
        pub title: String,
        pub body: String,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub action_url: Option<String>,
        /// Restricts dispatch to these channels, preferences still apply
        #[serde(default)]
        pub channels: Option<Vec<Channel>>,
    }

    /// `notification` is empty when the preferences of the owner suppressed it
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notification: Option<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notification: Option<Notification>) -> Self {
            Self {
                notification: notification.map(NotificationDTO::new),
            }
        }
    }
}
