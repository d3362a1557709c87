mod helpers;

use beacon_sdk::{
    AddPushSubscriptionInput, APIError, Category, CategoryPreferencePatch, Channel,
    CreateNotificationInput, NotificationType, PreferencePatch, Priority, ID,
};
use helpers::setup::spawn_app;
use reqwest::StatusCode;
use std::collections::HashMap;

fn bill_due(owner_id: &ID, entity_id: &str, body: &str) -> CreateNotificationInput {
    CreateNotificationInput {
        owner_id: owner_id.clone(),
        notification_type: NotificationType::Bill,
        tag: None,
        entity_id: Some(entity_id.into()),
        title: "Bill due".into(),
        body: body.into(),
        priority: Some(Priority::Urgent),
        action_url: Some(format!("/finance/bills/{}", entity_id)),
        channels: None,
    }
}

#[actix_web::main]
#[test]
async fn test_same_tag_updates_the_unread_notification() {
    let (app, producer, _) = spawn_app().await;
    let owner_id = ID::default();
    let sdk = app.user_sdk(&owner_id);

    let first = producer
        .notification
        .create(bill_due(&owner_id, "17", "Due in 3 days"))
        .await
        .expect("Expected to create notification")
        .notification
        .expect("Expected the notification to be stored");
    assert_eq!(first.tag, "bill:17");

    let second = producer
        .notification
        .create(bill_due(&owner_id, "17", "Due tomorrow"))
        .await
        .unwrap()
        .notification
        .unwrap();
    assert_eq!(second.id, first.id);

    let res = sdk.notification.list(None).await.unwrap();
    assert_eq!(res.unread_count, 1);
    assert_eq!(res.notifications.len(), 1);
    assert_eq!(res.notifications[0].body, "Due tomorrow");

    // Once read, a new event creates a new notification
    sdk.notification.mark_read(&first.id).await.unwrap();
    app.sys.advance(1000);
    producer
        .notification
        .create(bill_due(&owner_id, "17", "Due today"))
        .await
        .unwrap();
    let res = sdk.notification.list(None).await.unwrap();
    assert_eq!(res.unread_count, 1);
    assert_eq!(res.notifications.len(), 2);
    assert_eq!(res.notifications[0].body, "Due today");
}

#[actix_web::main]
#[test]
async fn test_mark_all_read() {
    let (app, producer, _) = spawn_app().await;
    let owner_id = ID::default();
    let sdk = app.user_sdk(&owner_id);

    for i in 0..5 {
        producer
            .notification
            .create(bill_due(&owner_id, &i.to_string(), "Due"))
            .await
            .unwrap();
    }
    assert_eq!(sdk.notification.list(None).await.unwrap().unread_count, 5);

    let res = sdk.notification.mark_all_read().await.unwrap();
    assert_eq!(res.updated_count, 5);

    let res = sdk.notification.list(None).await.unwrap();
    assert_eq!(res.unread_count, 0);
    assert_eq!(res.notifications.len(), 5);
    assert!(res.notifications.iter().all(|n| n.is_read));

    let res = sdk.notification.list(Some(2)).await.unwrap();
    assert_eq!(res.notifications.len(), 2);
}

#[actix_web::main]
#[test]
async fn test_disabled_category_suppresses_notifications() {
    let (app, producer, _) = spawn_app().await;
    let owner_id = ID::default();
    let sdk = app.user_sdk(&owner_id);

    let mut categories = HashMap::new();
    categories.insert(
        Category::Billing,
        CategoryPreferencePatch {
            enabled: Some(false),
            ..Default::default()
        },
    );
    sdk.preference
        .update(PreferencePatch {
            channels: None,
            categories: Some(categories),
        })
        .await
        .unwrap();

    let res = producer
        .notification
        .create(bill_due(&owner_id, "17", "Due"))
        .await
        .expect("Suppressed notifications are not an error");
    assert!(res.notification.is_none());
    assert_eq!(sdk.notification.list(None).await.unwrap().notifications.len(), 0);
}

#[actix_web::main]
#[test]
async fn test_notifications_are_pushed_to_subscribed_devices() {
    let (app, producer, _) = spawn_app().await;
    let owner_id = ID::default();
    let sdk = app.user_sdk(&owner_id);
    sdk.push_subscription
        .add(AddPushSubscriptionInput {
            endpoint: "https://push.example.com/device-1".into(),
            p256dh: "key".into(),
            auth: "secret".into(),
        })
        .await
        .unwrap();

    let notification = producer
        .notification
        .create(bill_due(&owner_id, "17", "Due tomorrow"))
        .await
        .unwrap()
        .notification
        .unwrap();

    let sent = app.pushed(1).await;
    assert_eq!(sent.len(), 1);
    let (subscription, payload) = &sent[0];
    assert_eq!(subscription.endpoint, "https://push.example.com/device-1");
    assert_eq!(payload.title, "Bill due");
    assert_eq!(payload.data.notification_id, notification.id.to_string());
    assert_eq!(payload.data.priority, Some(Priority::Urgent));

    // Events restricted to other channels are stored but not pushed
    let mut browser_only = bill_due(&owner_id, "18", "Due");
    browser_only.channels = Some(vec![Channel::Browser]);
    assert!(producer
        .notification
        .create(browser_only)
        .await
        .unwrap()
        .notification
        .is_some());
    assert_eq!(app.pushed(2).await.len(), 1);
}

#[actix_web::main]
#[test]
async fn test_notifications_of_others_are_not_found() {
    let (app, producer, _) = spawn_app().await;
    let owner_id = ID::default();
    let other = app.user_sdk(&ID::default());

    let notification = producer
        .notification
        .create(bill_due(&owner_id, "17", "Due"))
        .await
        .unwrap()
        .notification
        .unwrap();

    for res in vec![
        other.notification.mark_read(&notification.id).await.map(|_| ()),
        other.notification.delete(&notification.id).await.map(|_| ()),
    ] {
        match res {
            Err(APIError::UnexpectedStatusCode(status)) => assert_eq!(status, StatusCode::NOT_FOUND),
            _ => panic!("Expected not found"),
        }
    }
    assert_eq!(other.notification.list(None).await.unwrap().notifications.len(), 0);
}

#[actix_web::main]
#[test]
async fn test_notification_center() {
    let (app, producer, _) = spawn_app().await;
    let owner_id = ID::default();
    let sdk = app.user_sdk(&owner_id);

    let bill = producer
        .notification
        .create(bill_due(&owner_id, "17", "Due"))
        .await
        .unwrap()
        .notification
        .unwrap();
    let other_bill = producer
        .notification
        .create(bill_due(&owner_id, "18", "Due"))
        .await
        .unwrap()
        .notification
        .unwrap();

    let center = sdk.notification_center();
    center.refresh().await.expect("Expected to fetch notifications");
    assert_eq!(center.unread_count(), 2);
    assert_eq!(center.view().notifications.len(), 2);

    let target = center.click(&bill.id).await;
    assert_eq!(target, Some("/finance/bills/17".to_string()));
    assert_eq!(center.unread_count(), 1);

    center.delete(&other_bill.id).await;
    assert_eq!(center.unread_count(), 0);

    let res = sdk.notification.list(None).await.unwrap();
    assert_eq!(res.unread_count, 0);
    assert_eq!(res.notifications.len(), 1);
    assert!(res.notifications[0].is_read);

    center.start();
    assert!(center.is_polling());
    center.stop();
    assert!(!center.is_polling());
}
