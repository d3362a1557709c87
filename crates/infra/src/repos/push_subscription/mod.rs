mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use beacon_domain::{PushSubscription, ID};
pub use inmemory::InMemoryPushSubscriptionRepo;
pub use postgres::PostgresPushSubscriptionRepo;

#[async_trait::async_trait]
pub trait IPushSubscriptionRepo: Send + Sync {
    /// Endpoints are unique, registering a known endpoint again moves it
    /// to the given owner and refreshes its keys
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<()>;
    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<PushSubscription>>;
    async fn delete_by_endpoint(&self, owner_id: &ID, endpoint: &str)
        -> anyhow::Result<DeleteResult>;
    async fn delete(&self, subscription_id: &ID) -> Option<PushSubscription>;
}
