use crate::{
    handlers::{activate, fetch, install, message, notification_click, push},
    host::{DisplayNotification, Request, Response},
    WorkerContext,
};
use futures::future::BoxFuture;
use tracing::{debug, error};
use url::Url;

/// Events the hosting runtime delivers to the worker
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Install,
    Activate,
    /// Raw bytes of the push message, if it carried any
    Push(Option<Vec<u8>>),
    NotificationClick {
        action: Option<String>,
        notification: DisplayNotification,
    },
    Fetch(Request),
    Message(serde_json::Value),
}

impl WorkerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Activate => "activate",
            Self::Push(_) => "push",
            Self::NotificationClick { .. } => "notificationclick",
            Self::Fetch(_) => "fetch",
            Self::Message(_) => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Installed { cached: usize },
    Activated { deleted_caches: Vec<String> },
    Displayed(DisplayNotification),
    Dismissed,
    Focused(Url),
    Opened(Url),
    /// The worker did not answer and the runtime performs the request itself
    Passthrough,
    Responded(Response),
    SkippedWaiting,
    Ignored,
}

pub type Handler =
    for<'a> fn(&'a WorkerContext, WorkerEvent) -> BoxFuture<'a, anyhow::Result<EventOutcome>>;

pub static HANDLERS: [(&str, Handler); 6] = [
    ("install", install::handle),
    ("activate", activate::handle),
    ("push", push::handle),
    ("notificationclick", notification_click::handle),
    ("fetch", fetch::handle),
    ("message", message::handle),
];

pub fn handler_for(event_name: &str) -> Option<Handler> {
    HANDLERS
        .iter()
        .find(|(name, _)| *name == event_name)
        .map(|(_, handler)| *handler)
}

/// Runs the handler registered for the event. The returned future has to be
/// awaited before the runtime is allowed to suspend the worker.
#[tracing::instrument(name = "Handling worker event", skip(ctx, event), fields(event = event.name()))]
pub async fn dispatch(ctx: &WorkerContext, event: WorkerEvent) -> anyhow::Result<EventOutcome> {
    let handler = match handler_for(event.name()) {
        Some(handler) => handler,
        None => {
            debug!("No handler registered for {}", event.name());
            return Ok(EventOutcome::Ignored);
        }
    };
    let res = handler(ctx, event).await;
    if let Err(e) = &res {
        error!("Worker event failed: {:?}", e);
    }
    res
}
