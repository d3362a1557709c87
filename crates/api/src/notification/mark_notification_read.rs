use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::mark_notification_read::{APIResponse, PathParams};
use beacon_domain::{Notification, ID};
use beacon_infra::BeaconContext;

fn handle_error(e: UseCaseError) -> BeaconError {
    match e {
        UseCaseError::NotFound(id) => BeaconError::NotFound(format!(
            "The notification with id: {}, was not found.",
            id
        )),
        UseCaseError::StorageError => BeaconError::InternalError,
    }
}

pub async fn mark_notification_read_controller(
    http_req: actix_web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = MarkNotificationReadUseCase {
        owner_id: session.owner_id,
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub owner_id: ID,
    pub notification_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;

    type Errors = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        match ctx
            .repos
            .notifications
            .mark_read(&self.notification_id, &self.owner_id)
            .await
        {
            Ok(Some(notification)) => Ok(notification),
            Ok(None) => Err(UseCaseError::NotFound(self.notification_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::{NotificationType, Priority};

    async fn insert_notification(ctx: &BeaconContext, owner_id: &ID) -> Notification {
        let notification = Notification {
            id: Default::default(),
            owner_id: owner_id.clone(),
            tag: "post-failed:3".into(),
            notification_type: NotificationType::PostFailed,
            title: "Post failed".into(),
            body: "Instagram rejected the image".into(),
            priority: Priority::High,
            action_url: Some("/posts/3".into()),
            is_read: false,
            created_at: 0,
        };
        ctx.repos
            .notifications
            .upsert_unread(&notification)
            .await
            .unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn marks_read_and_is_idempotent() {
        let ctx = BeaconContext::create_inmemory();
        let owner_id = ID::default();
        let notification = insert_notification(&ctx, &owner_id).await;

        for _ in 0..2 {
            let mut usecase = MarkNotificationReadUseCase {
                owner_id: owner_id.clone(),
                notification_id: notification.id.clone(),
            };
            let res = usecase.execute(&ctx).await.unwrap();
            assert!(res.is_read);
        }
        assert_eq!(ctx.repos.notifications.count_unread(&owner_id).await.unwrap(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn other_owner_gets_not_found() {
        let ctx = BeaconContext::create_inmemory();
        let notification = insert_notification(&ctx, &ID::default()).await;

        let mut usecase = MarkNotificationReadUseCase {
            owner_id: ID::default(),
            notification_id: notification.id.clone(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(notification.id.clone())
        );
        assert!(!ctx
            .repos
            .notifications
            .find(&notification.id)
            .await
            .unwrap()
            .is_read);
    }
}
