use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::add_push_subscription::{APIResponse, RequestBody};
use beacon_domain::{PushSubscription, ID};
use beacon_infra::BeaconContext;

fn handle_error(e: UseCaseError) -> BeaconError {
    match e {
        UseCaseError::InvalidSubscription(msg) => BeaconError::BadClientData(msg),
        UseCaseError::StorageError => BeaconError::InternalError,
    }
}

pub async fn add_push_subscription_controller(
    http_req: actix_web::HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = AddPushSubscriptionUseCase {
        owner_id: session.owner_id,
        endpoint: body.endpoint,
        p256dh: body.p256dh,
        auth: body.auth,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| HttpResponse::Created().json(APIResponse::new(subscription)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct AddPushSubscriptionUseCase {
    pub owner_id: ID,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidSubscription(String),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddPushSubscriptionUseCase {
    type Response = PushSubscription;

    type Errors = UseCaseError;

    const NAME: &'static str = "AddPushSubscription";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        if self.p256dh.is_empty() || self.auth.is_empty() {
            return Err(UseCaseError::InvalidSubscription(
                "Both the p256dh and the auth key are required".into(),
            ));
        }
        let subscription = PushSubscription::new(
            self.owner_id.clone(),
            self.endpoint.clone(),
            self.p256dh.clone(),
            self.auth.clone(),
            ctx.sys.get_timestamp_millis(),
        )
        .map_err(|e| UseCaseError::InvalidSubscription(e.to_string()))?;

        ctx.repos
            .push_subscriptions
            .upsert(&subscription)
            .await
            .map(|_| subscription)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn rejects_non_http_endpoint() {
        let ctx = BeaconContext::create_inmemory();
        let mut usecase = AddPushSubscriptionUseCase {
            owner_id: ID::default(),
            endpoint: "javascript:alert(1)".into(),
            p256dh: "key".into(),
            auth: "auth".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidSubscription(_))
        ));
    }
}
