use crate::{
    event::{EventOutcome, WorkerEvent},
    WorkerContext, API_PATH_PREFIX, CACHE_NAME,
};
use futures::{future::BoxFuture, FutureExt};
use tracing::{debug, warn};

/// Network first for static assets, the cache is only read when the network fails.
/// Api calls and non GET requests are never answered by the worker.
pub fn handle(ctx: &WorkerContext, event: WorkerEvent) -> BoxFuture<'_, anyhow::Result<EventOutcome>> {
    async move {
        let request = match event {
            WorkerEvent::Fetch(request) => request,
            _ => return Ok(EventOutcome::Ignored),
        };
        if request.method != "GET" || request.url.path().starts_with(API_PATH_PREFIX) {
            return Ok(EventOutcome::Passthrough);
        }

        match ctx.network.fetch(&request).await {
            Ok(response) => {
                if response.is_success() {
                    if let Err(e) = ctx
                        .caches
                        .put(CACHE_NAME, &request, response.clone())
                        .await
                    {
                        warn!("Unable to cache {}: {:?}", request.url, e);
                    }
                }
                Ok(EventOutcome::Responded(response))
            }
            Err(e) => match ctx.caches.find(&request).await {
                Some(cached) => {
                    debug!("Network failed for {}, serving cached copy", request.url);
                    Ok(EventOutcome::Responded(cached))
                }
                None => Err(e),
            },
        }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dispatch,
        host::{ICacheStorage, Request, Response},
        inmemory::InMemoryHost,
    };
    use url::Url;

    fn url(path: &str) -> Url {
        Url::parse("https://app.example.com").unwrap().join(path).unwrap()
    }

    #[tokio::test]
    async fn it_never_touches_api_requests() {
        let host = InMemoryHost::default();
        host.network.route(&url("/api/v1/notifications"), Response::ok("[]"));
        host.network.set_offline(true);
        host.caches
            .put(
                CACHE_NAME,
                &Request::get(url("/api/v1/notifications")),
                Response::ok("stale"),
            )
            .await
            .unwrap();
        let ctx = host.context(url("/"));

        let outcome = dispatch(&ctx, WorkerEvent::Fetch(Request::get(url("/api/v1/notifications"))))
            .await
            .unwrap();
        assert_eq!(outcome, EventOutcome::Passthrough);
        assert!(host.network.requests().is_empty());
    }

    #[tokio::test]
    async fn it_is_network_first_and_caches_successes() {
        let host = InMemoryHost::default();
        host.network.route(&url("/app.js"), Response::ok("fresh"));
        host.caches
            .put(CACHE_NAME, &Request::get(url("/app.js")), Response::ok("old"))
            .await
            .unwrap();
        let ctx = host.context(url("/"));

        let outcome = dispatch(&ctx, WorkerEvent::Fetch(Request::get(url("/app.js"))))
            .await
            .unwrap();
        assert_eq!(outcome, EventOutcome::Responded(Response::ok("fresh")));
        let cached = host.caches.find(&Request::get(url("/app.js"))).await;
        assert_eq!(cached, Some(Response::ok("fresh")));
    }

    #[tokio::test]
    async fn it_falls_back_to_cache_when_offline() {
        let host = InMemoryHost::default();
        host.network.route(&url("/app.js"), Response::ok("fresh"));
        let ctx = host.context(url("/"));
        dispatch(&ctx, WorkerEvent::Fetch(Request::get(url("/app.js"))))
            .await
            .unwrap();

        host.network.set_offline(true);
        let outcome = dispatch(&ctx, WorkerEvent::Fetch(Request::get(url("/app.js"))))
            .await
            .unwrap();
        assert_eq!(outcome, EventOutcome::Responded(Response::ok("fresh")));

        let res = dispatch(&ctx, WorkerEvent::Fetch(Request::get(url("/other.css")))).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn it_does_not_cache_error_responses() {
        let host = InMemoryHost::default();
        let ctx = host.context(url("/"));

        let outcome = dispatch(&ctx, WorkerEvent::Fetch(Request::get(url("/missing.png"))))
            .await
            .unwrap();
        match outcome {
            EventOutcome::Responded(res) => assert_eq!(res.status, 404),
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert!(host.caches.cached_urls(CACHE_NAME).is_empty());
    }
}
