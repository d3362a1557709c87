use crate::{APIResponse, BaseClient};
use beacon_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct PushSubscriptionClient {
    base: Arc<BaseClient>,
}

pub type AddPushSubscriptionInput = add_push_subscription::RequestBody;

impl PushSubscriptionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn add(
        &self,
        input: AddPushSubscriptionInput,
    ) -> APIResponse<add_push_subscription::APIResponse> {
        self.base
            .post(input, "push-subscriptions".into(), StatusCode::CREATED)
            .await
    }

    pub async fn remove(&self, endpoint: &str) -> APIResponse<remove_push_subscription::APIResponse> {
        self.base
            .delete(
                format!(
                    "push-subscriptions?endpoint={}",
                    urlencoding::encode(endpoint)
                ),
                StatusCode::OK,
            )
            .await
    }
}
