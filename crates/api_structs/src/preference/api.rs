use crate::dtos::PreferencesDTO;
use beacon_domain::PreferenceRecord;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub preferences: PreferencesDTO,
}

impl PreferencesResponse {
    pub fn new(preferences: PreferenceRecord) -> Self {
        Self {
            preferences: PreferencesDTO::new(preferences),
        }
    }
}

pub mod get_preferences {
    use super::*;

    pub type APIResponse = PreferencesResponse;
}

pub mod update_preferences {
    use super::*;

    /// Only the toggles present are changed
    pub type RequestBody = beacon_domain::PreferencePatch;

    pub type APIResponse = PreferencesResponse;
}
