use super::IPushSubscriptionRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use beacon_domain::{PushSubscription, ID};
use std::sync::Mutex;

pub struct InMemoryPushSubscriptionRepo {
    subscriptions: Mutex<Vec<PushSubscription>>,
}

impl InMemoryPushSubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for InMemoryPushSubscriptionRepo {
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        upsert_by(
            subscription,
            &self.subscriptions,
            |s| s.endpoint == subscription.endpoint,
            |s| {
                s.owner_id = subscription.owner_id.clone();
                s.p256dh = subscription.p256dh.clone();
                s.auth = subscription.auth.clone();
            },
        );
        Ok(())
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<PushSubscription>> {
        Ok(find_by(&self.subscriptions, |s| s.owner_id == *owner_id))
    }

    async fn delete_by_endpoint(
        &self,
        owner_id: &ID,
        endpoint: &str,
    ) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.subscriptions, |s| {
            s.owner_id == *owner_id && s.endpoint == endpoint
        }))
    }

    async fn delete(&self, subscription_id: &ID) -> Option<PushSubscription> {
        delete(subscription_id, &self.subscriptions)
    }
}
