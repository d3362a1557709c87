use crate::shared::usecase::{Subscriber, UseCase};
use beacon_domain::{
    Channel, Notification, NotificationType, PreferenceRecord, Priority, PushPayload, ID,
};
use beacon_infra::{BeaconContext, PushError};
use futures::future::join_all;
use tracing::{debug, error, warn};

/// The single entry point for every producer of notifications. Gates the
/// event on the preferences of the owner, collapses it into the unread
/// notification with the same tag and dispatches it to the enabled channels.
#[derive(Debug)]
pub struct NotifyUseCase {
    pub owner_id: ID,
    pub notification_type: NotificationType,
    pub tag: String,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub action_url: Option<String>,
    /// Restricts the channels the event goes out on, `None` means all
    pub channels: Option<Vec<Channel>>,
}

#[derive(Debug, PartialEq)]
pub enum NotifyOutcome {
    /// The category of the notification is disabled by the owner
    Suppressed,
    Stored {
        notification: Notification,
        channels: Vec<Channel>,
    },
}

impl NotifyOutcome {
    pub fn notification(self) -> Option<Notification> {
        match self {
            Self::Suppressed => None,
            Self::Stored { notification, .. } => Some(notification),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

/// A channel is used when it is enabled globally, enabled for the category
/// and the event did not restrict itself to other channels
pub fn enabled_channels(
    preferences: &PreferenceRecord,
    notification_type: NotificationType,
    restriction: Option<&[Channel]>,
) -> Vec<Channel> {
    let category = preferences.category(notification_type.category());
    Channel::all()
        .iter()
        .copied()
        .filter(|channel| preferences.channels.is_enabled(*channel))
        .filter(|channel| category.channels.is_enabled(*channel))
        .filter(|channel| restriction.map(|r| r.contains(channel)).unwrap_or(true))
        .collect()
}

#[async_trait::async_trait(?Send)]
impl UseCase for NotifyUseCase {
    type Response = NotifyOutcome;

    type Errors = UseCaseError;

    const NAME: &'static str = "Notify";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let preferences = ctx
            .repos
            .preferences
            .find(&self.owner_id)
            .await
            .unwrap_or_else(|| PreferenceRecord::new(self.owner_id.clone()));

        if !preferences
            .category(self.notification_type.category())
            .enabled
        {
            debug!(
                "Suppressed notification with tag: {} because its category is disabled",
                self.tag
            );
            return Ok(NotifyOutcome::Suppressed);
        }

        let notification = Notification {
            id: Default::default(),
            owner_id: self.owner_id.clone(),
            tag: self.tag.clone(),
            notification_type: self.notification_type,
            title: self.title.clone(),
            body: self.body.clone(),
            priority: self.priority,
            action_url: self.action_url.clone(),
            is_read: false,
            created_at: ctx.sys.get_timestamp_millis(),
        };

        let notification = ctx
            .repos
            .notifications
            .upsert_unread(&notification)
            .await
            .map_err(|e| {
                error!("Unable to store notification: {:?}", e);
                UseCaseError::StorageError
            })?;

        let channels = enabled_channels(
            &preferences,
            self.notification_type,
            self.channels.as_deref(),
        );

        Ok(NotifyOutcome::Stored {
            notification,
            channels,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(PushChannelDispatcher),
            Box::new(InAppChannelDispatcher),
        ]
    }
}

fn dispatched_to(outcome: &NotifyOutcome, channel: Channel) -> Option<&Notification> {
    match outcome {
        NotifyOutcome::Stored {
            notification,
            channels,
        } if channels.contains(&channel) => Some(notification),
        _ => None,
    }
}

async fn deliver_push(ctx: BeaconContext, notification: Notification) {
    let subscriptions = match ctx
        .repos
        .push_subscriptions
        .find_by_owner(&notification.owner_id)
        .await
    {
        Ok(subscriptions) => subscriptions,
        Err(e) => {
            error!("Unable to fetch push subscriptions: {:?}", e);
            return;
        }
    };
    if subscriptions.is_empty() {
        debug!(
            "Owner: {} has no push subscriptions, skipping push delivery",
            notification.owner_id
        );
        return;
    }

    let payload = PushPayload::new(&notification);
    let payload = &payload;
    let gateway = &ctx.services.push_gateway;
    let deliveries = subscriptions
        .iter()
        .map(|subscription| async move { (subscription, gateway.send(subscription, payload).await) });
    for (subscription, res) in join_all(deliveries).await {
        match res {
            Ok(_) => {}
            Err(PushError::Gone) => {
                warn!(
                    "Push subscription: {} is gone, removing it",
                    subscription.id
                );
                ctx.repos.push_subscriptions.delete(&subscription.id).await;
            }
            Err(e) => {
                warn!(
                    "Push delivery of notification: {} failed: {}",
                    notification.id, e
                );
            }
        }
    }
}

/// Sends the notification to every push subscription of the owner.
/// Delivery runs in the background so a slow push service never holds up
/// the producer or the scheduler. Subscriptions the push service no longer
/// knows are removed.
pub struct PushChannelDispatcher;

#[async_trait::async_trait(?Send)]
impl Subscriber<NotifyUseCase> for PushChannelDispatcher {
    async fn notify(&self, outcome: &NotifyOutcome, ctx: &BeaconContext) {
        if let Some(notification) = dispatched_to(outcome, Channel::Push) {
            actix_web::rt::spawn(deliver_push(ctx.clone(), notification.clone()));
        }
    }
}

/// Publishes the notification to the open browser sessions of the owner
pub struct InAppChannelDispatcher;

#[async_trait::async_trait(?Send)]
impl Subscriber<NotifyUseCase> for InAppChannelDispatcher {
    async fn notify(&self, outcome: &NotifyOutcome, ctx: &BeaconContext) {
        if let Some(notification) = dispatched_to(outcome, Channel::Browser) {
            ctx.services.in_app.publish(notification);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use beacon_domain::{Category, PreferencePatch, PushSubscription};
    use beacon_infra::{InMemoryPushGateway, ManualSys};
    use std::{collections::HashMap, sync::Arc};

    struct TestContext {
        ctx: BeaconContext,
        gateway: Arc<InMemoryPushGateway>,
        owner_id: ID,
    }

    async fn setup() -> TestContext {
        let mut ctx = BeaconContext::create_inmemory();
        ctx.sys = Arc::new(ManualSys::new(1000));
        let gateway = Arc::new(InMemoryPushGateway::new());
        ctx.services.push_gateway = gateway.clone();
        let owner_id = ID::default();
        let subscription = PushSubscription::new(
            owner_id.clone(),
            "https://push.example.com/device-1".into(),
            "p256dh".into(),
            "auth".into(),
            0,
        )
        .unwrap();
        ctx.repos
            .push_subscriptions
            .upsert(&subscription)
            .await
            .unwrap();

        TestContext {
            ctx,
            gateway,
            owner_id,
        }
    }

    fn bill_due(owner_id: &ID, body: &str) -> NotifyUseCase {
        NotifyUseCase {
            owner_id: owner_id.clone(),
            notification_type: NotificationType::Bill,
            tag: "bill:17".into(),
            title: "Electricity bill".into(),
            body: body.into(),
            priority: Priority::High,
            action_url: Some("/finance/bills/17".into()),
            channels: None,
        }
    }

    // Push delivery runs in the background
    async fn settle() {
        actix_web::rt::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    async fn disable(ctx: &BeaconContext, owner_id: &ID, patch: PreferencePatch) {
        let mut preferences = PreferenceRecord::new(owner_id.clone());
        preferences.apply(&patch, 0);
        ctx.repos.preferences.save(&preferences).await.unwrap();
    }

    #[actix_web::main]
    #[test]
    async fn stores_and_dispatches_to_all_channels_by_default() {
        let TestContext {
            ctx,
            gateway,
            owner_id,
        } = setup().await;
        let mut in_app = ctx.services.in_app.subscribe();

        let outcome = execute(bill_due(&owner_id, "Due in 3 days"), &ctx)
            .await
            .unwrap();
        let notification = match outcome {
            NotifyOutcome::Stored {
                notification,
                channels,
            } => {
                assert_eq!(channels, Channel::all().to_vec());
                notification
            }
            NotifyOutcome::Suppressed => panic!("Expected the notification to be stored"),
        };
        assert_eq!(notification.created_at, 1000);
        assert_eq!(in_app.try_recv().unwrap(), notification);

        settle().await;
        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.data.notification_id, notification.id.as_string());
    }

    #[actix_web::main]
    #[test]
    async fn same_tag_updates_unread_notification() {
        let TestContext { ctx, owner_id, .. } = setup().await;

        let first = execute(bill_due(&owner_id, "Due in 3 days"), &ctx)
            .await
            .unwrap()
            .notification()
            .unwrap();
        let second = execute(bill_due(&owner_id, "Due tomorrow"), &ctx)
            .await
            .unwrap()
            .notification()
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.body, "Due tomorrow");
        let stored = ctx
            .repos
            .notifications
            .find_by_owner(&owner_id, 10)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(ctx.repos.notifications.count_unread(&owner_id).await.unwrap(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn disabled_category_suppresses_everything() {
        let TestContext {
            ctx,
            gateway,
            owner_id,
        } = setup().await;
        let mut categories = HashMap::new();
        categories.insert(
            Category::Billing,
            beacon_domain::CategoryPreferencePatch {
                enabled: Some(false),
                ..Default::default()
            },
        );
        disable(
            &ctx,
            &owner_id,
            PreferencePatch {
                channels: None,
                categories: Some(categories),
            },
        )
        .await;

        let outcome = execute(bill_due(&owner_id, "Due in 3 days"), &ctx)
            .await
            .unwrap();
        assert_eq!(outcome, NotifyOutcome::Suppressed);
        settle().await;
        assert!(gateway.sent().is_empty());
        assert_eq!(ctx.repos.notifications.count_unread(&owner_id).await.unwrap(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn disabled_push_channel_still_stores() {
        let TestContext {
            ctx,
            gateway,
            owner_id,
        } = setup().await;
        disable(
            &ctx,
            &owner_id,
            PreferencePatch {
                channels: Some(beacon_domain::ChannelTogglesPatch {
                    push: Some(false),
                    ..Default::default()
                }),
                categories: None,
            },
        )
        .await;

        let outcome = execute(bill_due(&owner_id, "Due in 3 days"), &ctx)
            .await
            .unwrap();
        assert!(outcome.notification().is_some());
        settle().await;
        assert!(gateway.sent().is_empty());
        assert_eq!(ctx.repos.notifications.count_unread(&owner_id).await.unwrap(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn delivery_failure_does_not_fail_notify() {
        let TestContext {
            ctx,
            gateway,
            owner_id,
        } = setup().await;
        gateway.fail_with(Some(PushError::Transport("connection refused".into())));

        let res = execute(bill_due(&owner_id, "Due in 3 days"), &ctx).await;
        assert!(res.unwrap().notification().is_some());
        settle().await;
        // Still registered, only gone subscriptions are removed
        assert_eq!(
            ctx.repos
                .push_subscriptions
                .find_by_owner(&owner_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[actix_web::main]
    #[test]
    async fn gone_subscriptions_are_removed() {
        let TestContext {
            ctx,
            gateway,
            owner_id,
        } = setup().await;
        gateway.fail_with(Some(PushError::Gone));

        assert!(execute(bill_due(&owner_id, "Due in 3 days"), &ctx).await.is_ok());
        settle().await;
        assert!(ctx
            .repos
            .push_subscriptions
            .find_by_owner(&owner_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn event_restriction_narrows_channels() {
        let mut preferences = PreferenceRecord::new(ID::default());
        preferences.finance.channels.browser = false;
        let channels = enabled_channels(&preferences, NotificationType::BudgetAlert, None);
        assert_eq!(channels, vec![Channel::Push, Channel::Email]);

        let channels = enabled_channels(
            &preferences,
            NotificationType::BudgetAlert,
            Some(&[Channel::Browser, Channel::Email][..]),
        );
        assert_eq!(channels, vec![Channel::Email]);

        preferences.channels.email = false;
        let channels = enabled_channels(
            &preferences,
            NotificationType::Reminder,
            Some(&[Channel::Browser, Channel::Email][..]),
        );
        assert_eq!(channels, vec![Channel::Browser]);
    }
}
