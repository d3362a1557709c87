use crate::dtos::PushSubscriptionDTO;
use beacon_domain::PushSubscription;
use serde::{Deserialize, Serialize};

pub mod add_push_subscription {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub endpoint: String,
        pub p256dh: String,
        pub auth: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subscription: PushSubscriptionDTO,
    }

    impl APIResponse {
        pub fn new(subscription: PushSubscription) -> Self {
            Self {
                subscription: PushSubscriptionDTO::new(subscription),
            }
        }
    }
}

pub mod remove_push_subscription {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub endpoint: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted_count: i64,
    }
}
