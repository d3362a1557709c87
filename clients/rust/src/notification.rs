use crate::{APIResponse, BaseClient, ID};
use beacon_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

pub type CreateNotificationInput = create_notification::RequestBody;

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Newest first together with the unread count, the server picks the
    /// page size when `limit` is empty
    pub async fn list(&self, limit: Option<usize>) -> APIResponse<get_notifications::APIResponse> {
        let path = match limit {
            Some(limit) => format!("notifications?limit={}", limit),
            None => "notifications".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn mark_read(
        &self,
        notification_id: &ID,
    ) -> APIResponse<mark_notification_read::APIResponse> {
        self.base
            .put(
                (),
                format!("notifications/{}/read", notification_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn mark_all_read(&self) -> APIResponse<mark_all_notifications_read::APIResponse> {
        self.base
            .put((), "notifications/read-all".into(), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, notification_id: &ID) -> APIResponse<delete_notification::APIResponse> {
        self.base
            .delete(format!("notifications/{}", notification_id), StatusCode::OK)
            .await
    }

    /// Requires a producer api key. A notification suppressed by the
    /// preferences of the owner comes back empty.
    pub async fn create(
        &self,
        input: CreateNotificationInput,
    ) -> APIResponse<create_notification::APIResponse> {
        self.base
            .post_expecting(
                input,
                "notifications".into(),
                &[StatusCode::CREATED, StatusCode::OK],
            )
            .await
    }
}
