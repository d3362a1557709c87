use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::get_notifications::{APIResponse, QueryParams};
use beacon_domain::{Notification, ID};
use beacon_infra::{BeaconContext, NOTIFICATIONS_PAGE_LIMIT_MAX};

fn handle_error(e: UseCaseError) -> BeaconError {
    match e {
        UseCaseError::StorageError => BeaconError::InternalError,
    }
}

pub async fn get_notifications_controller(
    http_req: actix_web::HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = GetNotificationsUseCase {
        owner_id: session.owner_id,
        limit: query_params.limit,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.notifications, res.unread_count)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub owner_id: ID,
    pub limit: Option<usize>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = UseCaseResponse;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let limit = self
            .limit
            .unwrap_or(ctx.config.notifications_page_limit)
            .clamp(1, NOTIFICATIONS_PAGE_LIMIT_MAX);

        let notifications = ctx
            .repos
            .notifications
            .find_by_owner(&self.owner_id, limit)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let unread_count = ctx
            .repos
            .notifications
            .count_unread(&self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse {
            notifications,
            unread_count,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::{NotificationType, Priority};

    async fn insert_notifications(ctx: &BeaconContext, owner_id: &ID, count: i64) {
        for i in 0..count {
            let notification = Notification {
                id: Default::default(),
                owner_id: owner_id.clone(),
                tag: format!("goal-progress:{}", i),
                notification_type: NotificationType::GoalProgress,
                title: "Goal progress".into(),
                body: format!("{}% reached", i),
                priority: Priority::Low,
                action_url: None,
                is_read: false,
                created_at: i,
            };
            ctx.repos
                .notifications
                .upsert_unread(&notification)
                .await
                .unwrap();
        }
    }

    #[actix_web::main]
    #[test]
    async fn returns_newest_first_with_unread_count() {
        let ctx = BeaconContext::create_inmemory();
        let owner_id = ID::default();
        insert_notifications(&ctx, &owner_id, 5).await;
        insert_notifications(&ctx, &ID::default(), 2).await;

        let mut usecase = GetNotificationsUseCase {
            owner_id,
            limit: Some(2),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications.len(), 2);
        assert_eq!(res.notifications[0].created_at, 4);
        assert_eq!(res.unread_count, 5);
    }

    #[actix_web::main]
    #[test]
    async fn limit_is_clamped() {
        let ctx = BeaconContext::create_inmemory();
        let owner_id = ID::default();
        insert_notifications(&ctx, &owner_id, 3).await;

        let mut usecase = GetNotificationsUseCase {
            owner_id,
            limit: Some(0),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications.len(), 1);
    }
}
