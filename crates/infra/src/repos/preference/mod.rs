mod inmemory;
mod postgres;

use beacon_domain::{PreferenceRecord, ID};
pub use inmemory::InMemoryPreferenceRepo;
pub use postgres::PostgresPreferenceRepo;

#[async_trait::async_trait]
pub trait IPreferenceRepo: Send + Sync {
    /// `None` when the user never stored any preferences
    async fn find(&self, owner_id: &ID) -> Option<PreferenceRecord>;
    /// Inserts or replaces the record of the owner
    async fn save(&self, preferences: &PreferenceRecord) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, BeaconContext};
    use beacon_domain::{Category, PreferenceRecord, ID};

    async fn create_contexts() -> Vec<BeaconContext> {
        vec![
            BeaconContext::create_inmemory(),
            setup_context().await.expect("To create context"),
        ]
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        for ctx in create_contexts().await {
            let owner_id = ID::default();
            assert!(ctx.repos.preferences.find(&owner_id).await.is_none());

            let mut prefs = PreferenceRecord::new(owner_id.clone());
            prefs.channels.email = false;
            ctx.repos.preferences.save(&prefs).await.unwrap();
            assert_eq!(ctx.repos.preferences.find(&owner_id).await, Some(prefs.clone()));

            prefs.posts.enabled = false;
            prefs.finance.channels.push = false;
            prefs.updated = 100;
            ctx.repos.preferences.save(&prefs).await.unwrap();
            let stored = ctx.repos.preferences.find(&owner_id).await.unwrap();
            assert!(!stored.category(Category::Posts).enabled);
            assert!(!stored.category(Category::Finance).channels.push);
            assert!(stored.category(Category::Reminders).enabled);
            assert_eq!(stored.updated, 100);
        }
    }
}
