use crate::{
    event::{EventOutcome, WorkerEvent},
    host::Request,
    WorkerContext, CACHE_NAME, SHELL_ASSETS,
};
use anyhow::Context;
use futures::{future::BoxFuture, FutureExt};
use tracing::info;

/// Stores the shell assets and activates without waiting for older workers
pub fn handle(ctx: &WorkerContext, event: WorkerEvent) -> BoxFuture<'_, anyhow::Result<EventOutcome>> {
    async move {
        if !matches!(event, WorkerEvent::Install) {
            return Ok(EventOutcome::Ignored);
        }
        for asset in SHELL_ASSETS.iter() {
            let url = ctx
                .origin
                .join(asset)
                .with_context(|| format!("Invalid shell asset path: {}", asset))?;
            let request = Request::get(url);
            let response = ctx.network.fetch(&request).await?;
            if !response.is_success() {
                anyhow::bail!("Shell asset {} responded with {}", asset, response.status);
            }
            ctx.caches.put(CACHE_NAME, &request, response).await?;
        }
        info!("Cached {} shell assets in {}", SHELL_ASSETS.len(), CACHE_NAME);
        ctx.registration.skip_waiting().await?;
        Ok(EventOutcome::Installed {
            cached: SHELL_ASSETS.len(),
        })
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dispatch, host::Response, inmemory::InMemoryHost};
    use url::Url;

    fn origin() -> Url {
        Url::parse("https://app.example.com").unwrap()
    }

    #[tokio::test]
    async fn it_caches_the_shell_and_skips_waiting() {
        let host = InMemoryHost::default();
        for asset in SHELL_ASSETS.iter() {
            host.network
                .route(&origin().join(asset).unwrap(), Response::ok(asset.as_bytes()));
        }
        let ctx = host.context(origin());

        let outcome = dispatch(&ctx, WorkerEvent::Install).await.unwrap();
        assert_eq!(
            outcome,
            EventOutcome::Installed {
                cached: SHELL_ASSETS.len()
            }
        );
        assert_eq!(host.caches.cached_urls(CACHE_NAME).len(), SHELL_ASSETS.len());
        assert!(host.registration.skipped_waiting());
    }

    #[tokio::test]
    async fn it_fails_install_when_an_asset_is_missing() {
        let host = InMemoryHost::default();
        let ctx = host.context(origin());

        assert!(dispatch(&ctx, WorkerEvent::Install).await.is_err());
        assert!(!host.registration.skipped_waiting());
    }
}
