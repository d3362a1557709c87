use crate::{
    event::{EventOutcome, WorkerEvent},
    WorkerContext,
};
use futures::{future::BoxFuture, FutureExt};
use tracing::debug;

pub const SKIP_WAITING: &str = "SKIP_WAITING";

pub fn handle(ctx: &WorkerContext, event: WorkerEvent) -> BoxFuture<'_, anyhow::Result<EventOutcome>> {
    async move {
        let message = match event {
            WorkerEvent::Message(message) => message,
            _ => return Ok(EventOutcome::Ignored),
        };
        match message.get("type").and_then(|t| t.as_str()) {
            Some(SKIP_WAITING) => {
                ctx.registration.skip_waiting().await?;
                Ok(EventOutcome::SkippedWaiting)
            }
            _ => {
                debug!("Ignoring message: {}", message);
                Ok(EventOutcome::Ignored)
            }
        }
    }
    .boxed()
}
