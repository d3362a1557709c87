use crate::{
    error::BeaconError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use beacon_api_structs::get_preferences::APIResponse;
use beacon_domain::{PreferenceRecord, ID};
use beacon_infra::BeaconContext;

pub async fn get_preferences_controller(
    http_req: actix_web::HttpRequest,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let session = protect_route(&http_req, &ctx)?;

    let usecase = GetPreferencesUseCase {
        owner_id: session.owner_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|preferences| HttpResponse::Ok().json(APIResponse::new(preferences)))
        .map_err(|e| match e {})
}

#[derive(Debug)]
pub struct GetPreferencesUseCase {
    pub owner_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPreferencesUseCase {
    type Response = PreferenceRecord;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetPreferences";

    /// Users who never changed anything get everything enabled
    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx
            .repos
            .preferences
            .find(&self.owner_id)
            .await
            .unwrap_or_else(|| PreferenceRecord::new(self.owner_id.clone())))
    }
}
