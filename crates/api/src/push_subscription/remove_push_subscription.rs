use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::remove_push_subscription::{APIResponse, QueryParams};
use beacon_domain::ID;
use beacon_infra::BeaconContext;

pub async fn remove_push_subscription_controller(
    http_req: actix_web::HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = RemovePushSubscriptionUseCase {
        owner_id: session.owner_id,
        endpoint: query_params.0.endpoint,
    };

    execute(usecase, &ctx)
        .await
        .map(|deleted_count| HttpResponse::Ok().json(APIResponse { deleted_count }))
        .map_err(|e| match e {
            UseCaseError::StorageError => BeaconError::InternalError,
        })
}

#[derive(Debug)]
pub struct RemovePushSubscriptionUseCase {
    pub owner_id: ID,
    pub endpoint: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RemovePushSubscriptionUseCase {
    type Response = i64;

    type Errors = UseCaseError;

    const NAME: &'static str = "RemovePushSubscription";

    /// Removing an unknown endpoint is not an error, it deletes nothing
    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .push_subscriptions
            .delete_by_endpoint(&self.owner_id, &self.endpoint)
            .await
            .map(|res| res.deleted_count)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::PushSubscription;

    #[actix_web::main]
    #[test]
    async fn removing_twice_deletes_once() {
        let ctx = BeaconContext::create_inmemory();
        let owner_id = ID::default();
        let endpoint = "https://push.example.com/device-1".to_string();
        let subscription =
            PushSubscription::new(owner_id.clone(), endpoint.clone(), "k".into(), "a".into(), 0)
                .unwrap();
        ctx.repos.push_subscriptions.upsert(&subscription).await.unwrap();

        let remove = || RemovePushSubscriptionUseCase {
            owner_id: owner_id.clone(),
            endpoint: endpoint.clone(),
        };
        assert_eq!(remove().execute(&ctx).await, Ok(1));
        assert_eq!(remove().execute(&ctx).await, Ok(0));
    }
}
