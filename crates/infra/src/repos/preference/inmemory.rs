use super::IPreferenceRepo;
use crate::repos::shared::inmemory_repo::*;
use beacon_domain::{PreferenceRecord, ID};
use std::sync::Mutex;

pub struct InMemoryPreferenceRepo {
    preferences: Mutex<Vec<PreferenceRecord>>,
}

impl InMemoryPreferenceRepo {
    pub fn new() -> Self {
        Self {
            preferences: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPreferenceRepo for InMemoryPreferenceRepo {
    async fn find(&self, owner_id: &ID) -> Option<PreferenceRecord> {
        find_by(&self.preferences, |p| p.owner_id == *owner_id).pop()
    }

    async fn save(&self, preferences: &PreferenceRecord) -> anyhow::Result<()> {
        upsert_by(
            preferences,
            &self.preferences,
            |p| p.owner_id == preferences.owner_id,
            |p| *p = preferences.clone(),
        );
        Ok(())
    }
}
