use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::update_preferences::{APIResponse, RequestBody};
use beacon_domain::{PreferencePatch, PreferenceRecord, ID};
use beacon_infra::BeaconContext;

pub async fn update_preferences_controller(
    http_req: actix_web::HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = UpdatePreferencesUseCase {
        owner_id: session.owner_id,
        patch: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|preferences| HttpResponse::Ok().json(APIResponse::new(preferences)))
        .map_err(|e| match e {
            UseCaseError::StorageError => BeaconError::InternalError,
        })
}

#[derive(Debug)]
pub struct UpdatePreferencesUseCase {
    pub owner_id: ID,
    pub patch: PreferencePatch,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdatePreferencesUseCase {
    type Response = PreferenceRecord;

    type Errors = UseCaseError;

    const NAME: &'static str = "UpdatePreferences";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let mut preferences = ctx
            .repos
            .preferences
            .find(&self.owner_id)
            .await
            .unwrap_or_else(|| PreferenceRecord::new(self.owner_id.clone()));
        preferences.apply(&self.patch, ctx.sys.get_timestamp_millis());

        ctx.repos
            .preferences
            .save(&preferences)
            .await
            .map(|_| preferences)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::{Category, CategoryPreferencePatch, ChannelTogglesPatch};
    use beacon_infra::ManualSys;
    use std::{collections::HashMap, sync::Arc};

    #[actix_web::main]
    #[test]
    async fn partial_updates_keep_other_toggles() {
        let mut ctx = BeaconContext::create_inmemory();
        ctx.sys = Arc::new(ManualSys::new(42));
        let owner_id = ID::default();

        let mut categories = HashMap::new();
        categories.insert(
            Category::Finance,
            CategoryPreferencePatch {
                enabled: None,
                channels: ChannelTogglesPatch {
                    push: Some(false),
                    ..Default::default()
                },
            },
        );
        let mut usecase = UpdatePreferencesUseCase {
            owner_id: owner_id.clone(),
            patch: PreferencePatch {
                channels: None,
                categories: Some(categories),
            },
        };
        usecase.execute(&ctx).await.unwrap();

        let mut usecase = UpdatePreferencesUseCase {
            owner_id: owner_id.clone(),
            patch: PreferencePatch {
                channels: Some(ChannelTogglesPatch {
                    email: Some(false),
                    ..Default::default()
                }),
                categories: None,
            },
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(!res.channels.email);
        assert!(res.channels.push);
        assert!(!res.category(Category::Finance).channels.push);
        assert!(res.category(Category::Finance).enabled);
        assert_eq!(res.updated, 42);
        assert_eq!(ctx.repos.preferences.find(&owner_id).await, Some(res));
    }
}
