mod helpers;

use beacon_sdk::{
    APIError, AddPushSubscriptionInput, BeaconSDK, Category, CategoryPreferencePatch,
    ChannelTogglesPatch, PreferencePatch, Session, ID,
};
use helpers::setup::spawn_app;
use reqwest::StatusCode;
use std::collections::HashMap;

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_requests_without_valid_session_are_rejected() {
    let (app, _, address) = spawn_app().await;

    let expired = BeaconSDK::new(address.clone(), Session::new("garbage", 0));
    match expired.notification.list(None).await {
        Err(APIError::UnexpectedStatusCode(status)) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED)
        }
        other => panic!("Expected unauthorized, got: {:?}", other.is_ok()),
    }

    let sdk = app.user_sdk(&ID::default());
    assert!(sdk.notification.list(None).await.is_ok());
    sdk.logout();
    assert!(sdk.notification.list(None).await.is_err());
}

#[actix_web::main]
#[test]
async fn test_producer_key_is_required_for_producer_routes() {
    let (app, _, address) = spawn_app().await;
    let owner_id = ID::default();
    let input = beacon_sdk::CreateNotificationInput {
        owner_id: owner_id.clone(),
        notification_type: beacon_sdk::NotificationType::System,
        tag: None,
        entity_id: None,
        title: "Maintenance".into(),
        body: "Tonight at 22:00".into(),
        priority: None,
        action_url: None,
        channels: None,
    };

    let wrong_key = BeaconSDK::producer(address, "not-the-key");
    assert!(wrong_key.notification.create(input.clone()).await.is_err());
    // A user session is not enough either
    assert!(app
        .user_sdk(&owner_id)
        .notification
        .create(input)
        .await
        .is_err());
}

#[actix_web::main]
#[test]
async fn test_preferences_roundtrip() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.user_sdk(&ID::default());

    let res = sdk.preference.get().await.expect("Expected preferences");
    assert!(res.preferences.channels.push);
    assert!(res.preferences.categories.billing.enabled);

    let mut categories = HashMap::new();
    categories.insert(
        Category::Billing,
        CategoryPreferencePatch {
            enabled: Some(false),
            ..Default::default()
        },
    );
    let patch = PreferencePatch {
        channels: Some(ChannelTogglesPatch {
            email: Some(false),
            ..Default::default()
        }),
        categories: Some(categories),
    };
    let res = sdk
        .preference
        .update(patch)
        .await
        .expect("Expected to update preferences");
    assert!(!res.preferences.channels.email);
    assert!(res.preferences.channels.push);
    assert!(!res.preferences.categories.billing.enabled);
    assert!(res.preferences.categories.reminders.enabled);

    let res = sdk.preference.get().await.unwrap();
    assert!(!res.preferences.categories.billing.enabled);
}

#[actix_web::main]
#[test]
async fn test_push_subscriptions() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.user_sdk(&ID::default());
    let endpoint = "https://push.example.com/send/abc?x=1";

    let input = || AddPushSubscriptionInput {
        endpoint: endpoint.into(),
        p256dh: "key".into(),
        auth: "secret".into(),
    };
    let res = sdk
        .push_subscription
        .add(input())
        .await
        .expect("Expected to add subscription");
    assert_eq!(res.subscription.endpoint, endpoint);
    // Registering the same device again does not duplicate it
    assert!(sdk.push_subscription.add(input()).await.is_ok());

    let res = sdk.push_subscription.remove(endpoint).await.unwrap();
    assert_eq!(res.deleted_count, 1);
    let res = sdk.push_subscription.remove(endpoint).await.unwrap();
    assert_eq!(res.deleted_count, 0);

    let bad = AddPushSubscriptionInput {
        endpoint: "not a url".into(),
        p256dh: "key".into(),
        auth: "secret".into(),
    };
    assert!(sdk.push_subscription.add(bad).await.is_err());
}
