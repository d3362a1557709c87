use crate::config::Config;
use beacon_domain::{PushPayload, PushSubscription};
use std::{sync::Mutex, time::Duration};
use thiserror::Error;
use tracing::{error, warn};
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushError, WebPushMessage, WebPushMessageBuilder,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PushError {
    /// The push service no longer knows the subscription
    #[error("Push subscription is gone")]
    Gone,
    #[error("Push message could not be built: {0}")]
    InvalidMessage(String),
    #[error("Push service rejected the message: {0}")]
    Rejected(String),
    #[error("Unable to reach the push service: {0}")]
    Transport(String),
}

impl From<WebPushError> for PushError {
    fn from(e: WebPushError) -> Self {
        match e {
            WebPushError::EndpointNotValid { .. } | WebPushError::EndpointNotFound { .. } => {
                Self::Gone
            }
            e => Self::Rejected(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<(), PushError>;
}

struct Vapid {
    private_key_pem: String,
    subject: String,
}

/// Delivers encrypted web push messages (aes128gcm) signed with the
/// configured VAPID key
pub struct WebPushGateway {
    client: IsahcWebPushClient,
    vapid: Option<Vapid>,
    ttl_secs: u32,
    timeout: Duration,
}

impl WebPushGateway {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = IsahcWebPushClient::new()?;
        let vapid = match &config.vapid_private_key {
            Some(private_key_pem) => Some(Vapid {
                private_key_pem: private_key_pem.clone(),
                subject: config.vapid_subject.clone(),
            }),
            None => {
                warn!(
                    "VAPID_PRIVATE_KEY is not set, push services requiring VAPID will reject every message."
                );
                None
            }
        };
        Ok(Self {
            client,
            vapid,
            ttl_secs: config.push_ttl_secs,
            timeout: Duration::from_secs(config.push_timeout_secs),
        })
    }

    fn build_message(
        &self,
        subscription: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<WebPushMessage, PushError> {
        let info = SubscriptionInfo::new(
            subscription.endpoint.clone(),
            subscription.p256dh.clone(),
            subscription.auth.clone(),
        );
        let content =
            serde_json::to_vec(payload).map_err(|e| PushError::InvalidMessage(e.to_string()))?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, &content);
        builder.set_ttl(self.ttl_secs);
        if let Some(vapid) = &self.vapid {
            let mut signature = VapidSignatureBuilder::from_pem(vapid.private_key_pem.as_bytes(), &info)
                .map_err(|e| PushError::InvalidMessage(e.to_string()))?;
            signature.add_claim("sub", vapid.subject.as_str());
            let signature = signature
                .build()
                .map_err(|e| PushError::InvalidMessage(e.to_string()))?;
            builder.set_vapid_signature(signature);
        }
        builder
            .build()
            .map_err(|e| PushError::InvalidMessage(e.to_string()))
    }
}

#[async_trait::async_trait]
impl IPushGateway for WebPushGateway {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<(), PushError> {
        let message = self.build_message(subscription, payload)?;
        match tokio::time::timeout(self.timeout, self.client.send(message)).await {
            Ok(res) => res.map_err(PushError::from),
            Err(_) => {
                error!(
                    "[Network Error] Push service did not answer within {:?}",
                    self.timeout
                );
                Err(PushError::Transport("timed out".into()))
            }
        }
    }
}

/// Records every message instead of sending it
pub struct InMemoryPushGateway {
    sent: Mutex<Vec<(PushSubscription, PushPayload)>>,
    failure: Mutex<Option<PushError>>,
}

impl InMemoryPushGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn sent(&self) -> Vec<(PushSubscription, PushPayload)> {
        self.sent.lock().unwrap().clone()
    }

    /// Every following send fails with the given error, `None` restores delivery
    pub fn fail_with(&self, failure: Option<PushError>) {
        *self.failure.lock().unwrap() = failure;
    }
}

impl Default for InMemoryPushGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPushGateway for InMemoryPushGateway {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<(), PushError> {
        if let Some(failure) = self.failure.lock().unwrap().clone() {
            return Err(failure);
        }
        self.sent
            .lock()
            .unwrap()
            .push((subscription.clone(), payload.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_domain::{Notification, NotificationType, Priority, ID};

    fn payload(priority: Priority) -> PushPayload {
        PushPayload::new(&Notification {
            id: ID::default(),
            owner_id: ID::default(),
            tag: "system:1".into(),
            notification_type: NotificationType::System,
            title: "Maintenance".into(),
            body: "Tonight".into(),
            priority,
            action_url: None,
            is_read: false,
            created_at: 0,
        })
    }

    #[test]
    fn other_push_service_errors_are_rejections() {
        assert!(matches!(
            PushError::from(WebPushError::PayloadTooLarge),
            PushError::Rejected(_)
        ));
        assert!(matches!(
            PushError::from(WebPushError::InvalidUri),
            PushError::Rejected(_)
        ));
    }

    #[tokio::test]
    async fn inmemory_gateway_records_and_fails() {
        let gateway = InMemoryPushGateway::new();
        let sub = PushSubscription::new(
            ID::default(),
            "https://push.example.com/1".into(),
            "k".into(),
            "a".into(),
            0,
        )
        .unwrap();
        assert!(gateway.send(&sub, &payload(Priority::High)).await.is_ok());
        gateway.fail_with(Some(PushError::Gone));
        assert_eq!(
            gateway.send(&sub, &payload(Priority::High)).await,
            Err(PushError::Gone)
        );
        assert_eq!(gateway.sent().len(), 1);
    }
}
