use beacon_domain::{PushSubscription, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscriptionDTO {
    pub id: ID,
    pub endpoint: String,
    pub created: i64,
}

impl PushSubscriptionDTO {
    pub fn new(subscription: PushSubscription) -> Self {
        Self {
            id: subscription.id,
            endpoint: subscription.endpoint,
            created: subscription.created,
        }
    }
}
