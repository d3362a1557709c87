use crate::{
    event::{EventOutcome, WorkerEvent},
    WorkerContext, CACHE_NAME,
};
use futures::{future::BoxFuture, FutureExt};
use tracing::info;

/// Drops caches from other versions and takes over the open windows
pub fn handle(ctx: &WorkerContext, event: WorkerEvent) -> BoxFuture<'_, anyhow::Result<EventOutcome>> {
    async move {
        if !matches!(event, WorkerEvent::Activate) {
            return Ok(EventOutcome::Ignored);
        }
        let mut deleted_caches = Vec::new();
        for name in ctx.caches.keys().await? {
            if name != CACHE_NAME && ctx.caches.delete(&name).await? {
                info!("Deleted outdated cache: {}", name);
                deleted_caches.push(name);
            }
        }
        ctx.clients.claim().await?;
        Ok(EventOutcome::Activated { deleted_caches })
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dispatch, inmemory::ClientCall, inmemory::InMemoryHost};
    use url::Url;

    #[tokio::test]
    async fn it_deletes_outdated_caches_and_claims_clients() {
        let host = InMemoryHost::default();
        host.caches.create_cache("beacon-shell-v0");
        host.caches.create_cache(CACHE_NAME);
        let ctx = host.context(Url::parse("https://app.example.com").unwrap());

        let outcome = dispatch(&ctx, WorkerEvent::Activate).await.unwrap();
        assert_eq!(
            outcome,
            EventOutcome::Activated {
                deleted_caches: vec!["beacon-shell-v0".to_string()]
            }
        );
        assert_eq!(ctx.caches.keys().await.unwrap(), vec![CACHE_NAME.to_string()]);
        assert_eq!(host.clients.calls(), vec![ClientCall::Claim]);
    }
}
