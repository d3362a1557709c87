use beacon_domain::{CategoryPreference, ChannelToggles, PreferenceRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDTO {
    pub channels: ChannelToggles,
    pub categories: CategoryPreferencesDTO,
    pub updated: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPreferencesDTO {
    pub reminders: CategoryPreference,
    pub billing: CategoryPreference,
    pub posts: CategoryPreference,
    pub finance: CategoryPreference,
    pub system: CategoryPreference,
}

impl PreferencesDTO {
    pub fn new(preferences: PreferenceRecord) -> Self {
        Self {
            channels: preferences.channels,
            categories: CategoryPreferencesDTO {
                reminders: preferences.reminders,
                billing: preferences.billing,
                posts: preferences.posts,
                finance: preferences.finance,
                system: preferences.system,
            },
            updated: preferences.updated,
        }
    }
}
