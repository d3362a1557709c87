use crate::{APIResponse, BaseClient};
use beacon_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct PreferenceClient {
    base: Arc<BaseClient>,
}

impl PreferenceClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self) -> APIResponse<get_preferences::APIResponse> {
        self.base
            .get("notifications/preferences".into(), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        patch: update_preferences::RequestBody,
    ) -> APIResponse<update_preferences::APIResponse> {
        self.base
            .put(patch, "notifications/preferences".into(), StatusCode::OK)
            .await
    }
}
