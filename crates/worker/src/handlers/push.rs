use crate::{
    event::{EventOutcome, WorkerEvent},
    host::{DisplayNotification, NotificationAction},
    WorkerContext,
};
use beacon_domain::{Priority, DEFAULT_BADGE, DEFAULT_ICON};
use futures::{future::BoxFuture, FutureExt};
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_TITLE: &str = "Workspace Notification";
pub const DEFAULT_BODY: &str = "You have a new notification";
pub const VIBRATION_PATTERN: [u32; 3] = [100, 50, 100];
pub const OPEN_ACTION: &str = "open";
pub const DISMISS_ACTION: &str = "dismiss";

// Every field is optional so that a partial payload still renders
#[derive(Debug, Default)]
struct IncomingPush {
    title: Option<String>,
    body: Option<String>,
    icon: Option<String>,
    badge: Option<String>,
    action_url: Option<String>,
    priority: Option<Priority>,
    notification_id: Option<String>,
}

fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl IncomingPush {
    // A field of the wrong shape only loses that field
    fn from_json(value: &Value) -> Self {
        let data = value.get("data").unwrap_or(&Value::Null);
        Self {
            title: text(value, "title"),
            body: text(value, "body"),
            icon: text(value, "icon"),
            badge: text(value, "badge"),
            action_url: text(data, "actionUrl"),
            priority: data
                .get("priority")
                .and_then(|p| serde_json::from_value(p.clone()).ok()),
            notification_id: text(data, "notificationId"),
        }
    }

    fn plain_text(raw: &[u8]) -> Self {
        Self {
            body: Some(String::from_utf8_lossy(raw).trim().to_string()),
            ..Default::default()
        }
    }
}

fn parse(raw: Option<&[u8]>) -> IncomingPush {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return IncomingPush::default(),
    };
    match serde_json::from_slice::<Value>(raw) {
        Ok(value @ Value::Object(_)) => IncomingPush::from_json(&value),
        Ok(Value::String(body)) => IncomingPush {
            body: Some(body),
            ..Default::default()
        },
        Ok(_) => IncomingPush::plain_text(raw),
        Err(e) => {
            warn!("Push payload is not valid json, showing it as text: {:?}", e);
            IncomingPush::plain_text(raw)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn build_notification(raw: Option<&[u8]>) -> DisplayNotification {
    let push = parse(raw);
    let tag = non_empty(push.notification_id);
    DisplayNotification {
        title: non_empty(push.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        body: non_empty(push.body).unwrap_or_else(|| DEFAULT_BODY.to_string()),
        icon: non_empty(push.icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
        badge: non_empty(push.badge).unwrap_or_else(|| DEFAULT_BADGE.to_string()),
        vibrate: VIBRATION_PATTERN.to_vec(),
        // Renotify is only meaningful for a tagged notification
        renotify: tag.is_some(),
        tag,
        require_interaction: push.priority == Some(Priority::Urgent),
        actions: vec![
            NotificationAction {
                action: OPEN_ACTION.into(),
                title: "Open".into(),
            },
            NotificationAction {
                action: DISMISS_ACTION.into(),
                title: "Dismiss".into(),
            },
        ],
        action_url: push.action_url,
    }
}

pub fn handle(ctx: &WorkerContext, event: WorkerEvent) -> BoxFuture<'_, anyhow::Result<EventOutcome>> {
    async move {
        let raw = match event {
            WorkerEvent::Push(raw) => raw,
            _ => return Ok(EventOutcome::Ignored),
        };
        let notification = build_notification(raw.as_deref());
        ctx.registration.show_notification(&notification).await?;
        Ok(EventOutcome::Displayed(notification))
    }
    .boxed()
}
