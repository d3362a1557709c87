use super::push::DISMISS_ACTION;
use crate::{
    event::{EventOutcome, WorkerEvent},
    WorkerContext,
};
use anyhow::Context;
use futures::{future::BoxFuture, FutureExt};
use tracing::{info, warn};

pub fn handle(ctx: &WorkerContext, event: WorkerEvent) -> BoxFuture<'_, anyhow::Result<EventOutcome>> {
    async move {
        let (action, notification) = match event {
            WorkerEvent::NotificationClick {
                action,
                notification,
            } => (action, notification),
            _ => return Ok(EventOutcome::Ignored),
        };
        ctx.registration
            .close_notification(notification.tag.as_deref())
            .await?;
        if action.as_deref() == Some(DISMISS_ACTION) {
            return Ok(EventOutcome::Dismissed);
        }

        let action_url = notification.action_url.as_deref().unwrap_or("/");
        let mut target = ctx
            .origin
            .join(action_url)
            .with_context(|| format!("Invalid action url: {}", action_url))?;
        if target.origin() != ctx.origin.origin() {
            warn!(
                "Ignoring action url: {} outside of the application origin",
                action_url
            );
            target = ctx.origin.join("/")?;
        }

        let windows = ctx.clients.windows().await?;
        match windows
            .iter()
            .find(|w| w.url.origin() == ctx.origin.origin())
        {
            Some(window) => {
                ctx.clients.focus(&window.id).await?;
                ctx.clients.navigate(&window.id, &target).await?;
                info!("Focused window {} at {}", window.id, target);
                Ok(EventOutcome::Focused(target))
            }
            None => {
                ctx.clients.open_window(&target).await?;
                Ok(EventOutcome::Opened(target))
            }
        }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dispatch,
        handlers::push::build_notification,
        inmemory::{ClientCall, InMemoryHost},
    };
    use url::Url;

    fn origin() -> Url {
        Url::parse("https://app.example.com").unwrap()
    }

    fn click(action: Option<&str>, payload: &[u8]) -> WorkerEvent {
        WorkerEvent::NotificationClick {
            action: action.map(String::from),
            notification: build_notification(Some(payload)),
        }
    }

    const PAYLOAD: &[u8] =
        br#"{ "title": "Bill", "data": { "actionUrl": "/finance/bills/1", "notificationId": "n-1" } }"#;

    #[tokio::test]
    async fn it_stops_on_dismiss() {
        let host = InMemoryHost::default();
        host.clients.add_window("w1", origin());
        let ctx = host.context(origin());

        let outcome = dispatch(&ctx, click(Some("dismiss"), PAYLOAD)).await.unwrap();
        assert_eq!(outcome, EventOutcome::Dismissed);
        assert_eq!(host.registration.closed(), vec![Some("n-1".to_string())]);
        assert!(host.clients.calls().is_empty());
    }

    #[tokio::test]
    async fn it_focuses_a_same_origin_window() {
        let host = InMemoryHost::default();
        host.clients
            .add_window("other", Url::parse("https://elsewhere.example.org").unwrap());
        host.clients.add_window("w1", origin().join("/dashboard").unwrap());
        let ctx = host.context(origin());

        let outcome = dispatch(&ctx, click(Some("open"), PAYLOAD)).await.unwrap();
        let target = origin().join("/finance/bills/1").unwrap();
        assert_eq!(outcome, EventOutcome::Focused(target.clone()));
        assert_eq!(
            host.clients.calls(),
            vec![
                ClientCall::Focus("w1".into()),
                ClientCall::Navigate("w1".into(), target)
            ]
        );
    }

    #[tokio::test]
    async fn it_opens_a_window_at_root_by_default() {
        let host = InMemoryHost::default();
        let ctx = host.context(origin());

        let outcome = dispatch(&ctx, click(None, b"plain text")).await.unwrap();
        assert_eq!(outcome, EventOutcome::Opened(origin()));
        assert_eq!(host.clients.calls(), vec![ClientCall::Open(origin())]);
    }

    #[tokio::test]
    async fn it_stays_on_the_application_origin() {
        let host = InMemoryHost::default();
        host.clients.add_window("w1", origin().join("/dashboard").unwrap());
        let ctx = host.context(origin());
        let payload =
            br#"{ "title": "Bill", "data": { "actionUrl": "https://evil.example.net/login" } }"#;

        let outcome = dispatch(&ctx, click(Some("open"), payload)).await.unwrap();
        let root = origin().join("/").unwrap();
        assert_eq!(outcome, EventOutcome::Focused(root.clone()));
        assert_eq!(
            host.clients.calls(),
            vec![
                ClientCall::Focus("w1".into()),
                ClientCall::Navigate("w1".into(), root)
            ]
        );
    }
}
