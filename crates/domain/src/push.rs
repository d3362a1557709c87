use crate::{
    notification::{Notification, Priority},
    shared::entity::{Entity, Owned, ID},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ICON: &str = "/icons/icon-192x192.png";
pub const DEFAULT_BADGE: &str = "/icons/badge-72x72.png";

/// The json document delivered through the push transport to a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub data: PushPayloadData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayloadData {
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    pub notification_id: String,
}

impl PushPayload {
    pub fn new(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            body: notification.body.clone(),
            icon: Some(notification.notification_type.display().icon.to_string()),
            badge: Some(DEFAULT_BADGE.to_string()),
            data: PushPayloadData {
                action_url: notification.action_url.clone(),
                priority: Some(notification.priority),
                notification_id: notification.id.as_string(),
            },
        }
    }
}

/// A device registration for OS level push messages
#[derive(Debug, Clone, PartialEq)]
pub struct PushSubscription {
    pub id: ID,
    pub owner_id: ID,
    /// Push service endpoint the payload is posted to
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub created: i64,
}

impl PushSubscription {
    /// Only http(s) endpoints are accepted
    pub fn new(
        owner_id: ID,
        endpoint: String,
        p256dh: String,
        auth: String,
        now: i64,
    ) -> Result<Self, InvalidEndpointError> {
        let parsed = url::Url::parse(&endpoint)
            .map_err(|_| InvalidEndpointError(endpoint.clone()))?;
        if !["https", "http"].contains(&parsed.scheme()) {
            return Err(InvalidEndpointError(endpoint));
        }
        Ok(Self {
            id: Default::default(),
            owner_id,
            endpoint,
            p256dh,
            auth,
            created: now,
        })
    }
}

#[derive(Error, Debug)]
#[error("Push endpoint: {0} is not a valid http(s) url")]
pub struct InvalidEndpointError(pub String);

impl Entity for PushSubscription {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for PushSubscription {
    fn owner_id(&self) -> &ID {
        &self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationType;

    #[test]
    fn payload_wire_format() {
        let notification = Notification {
            id: ID::default(),
            owner_id: ID::default(),
            tag: "bill:1".into(),
            notification_type: NotificationType::Bill,
            title: "Bill due".into(),
            body: "Electricity is due tomorrow".into(),
            priority: Priority::Urgent,
            action_url: Some("/finance/bills/1".into()),
            is_read: false,
            created_at: 0,
        };
        let payload = PushPayload::new(&notification);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["title"], "Bill due");
        assert_eq!(json["icon"], "/icons/bill.png");
        assert_eq!(json["data"]["actionUrl"], "/finance/bills/1");
        assert_eq!(json["data"]["priority"], "urgent");
        assert_eq!(json["data"]["notificationId"], notification.id.as_string());
    }

    #[test]
    fn subscription_requires_http_endpoint() {
        let owner = ID::default();
        assert!(PushSubscription::new(
            owner.clone(),
            "https://push.example.com/abc".into(),
            "key".into(),
            "auth".into(),
            0
        )
        .is_ok());
        assert!(PushSubscription::new(owner, "ftp://x".into(), "k".into(), "a".into(), 0).is_err());
    }
}
