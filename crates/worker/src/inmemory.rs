//! Host implementations that keep everything in process memory. Used to run
//! the worker outside of a real runtime.

use crate::{
    host::{
        DisplayNotification, ICacheStorage, IClients, INetwork, IRegistration, Request, Response,
        WindowClient,
    },
    WorkerContext,
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};
use thiserror::Error;
use url::Url;

#[derive(Default)]
pub struct InMemoryCacheStorage {
    caches: Mutex<BTreeMap<String, Vec<(Url, Response)>>>,
}

impl InMemoryCacheStorage {
    pub fn cached_urls(&self, cache_name: &str) -> Vec<Url> {
        let caches = self.caches.lock().unwrap();
        caches
            .get(cache_name)
            .map(|entries| entries.iter().map(|(url, _)| url.clone()).collect())
            .unwrap_or_default()
    }

    pub fn create_cache(&self, cache_name: &str) {
        let mut caches = self.caches.lock().unwrap();
        caches.entry(cache_name.to_string()).or_default();
    }
}

#[async_trait]
impl ICacheStorage for InMemoryCacheStorage {
    async fn keys(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.caches.lock().unwrap().keys().cloned().collect())
    }

    async fn delete(&self, cache_name: &str) -> anyhow::Result<bool> {
        Ok(self.caches.lock().unwrap().remove(cache_name).is_some())
    }

    async fn put(
        &self,
        cache_name: &str,
        request: &Request,
        response: Response,
    ) -> anyhow::Result<()> {
        let mut caches = self.caches.lock().unwrap();
        let entries = caches.entry(cache_name.to_string()).or_default();
        entries.retain(|(url, _)| url != &request.url);
        entries.push((request.url.clone(), response));
        Ok(())
    }

    async fn find(&self, request: &Request) -> Option<Response> {
        let caches = self.caches.lock().unwrap();
        caches.values().find_map(|entries| {
            entries
                .iter()
                .find(|(url, _)| url == &request.url)
                .map(|(_, response)| response.clone())
        })
    }
}

#[derive(Error, Debug)]
#[error("Network is unreachable")]
pub struct OfflineError;

/// Serves a fixed set of routes, anything unknown is a 404
#[derive(Default)]
pub struct InMemoryNetwork {
    routes: Mutex<BTreeMap<String, Response>>,
    requests: Mutex<Vec<Request>>,
    offline: AtomicBool,
}

impl InMemoryNetwork {
    pub fn route(&self, url: &Url, response: Response) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.as_str().to_string(), response);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl INetwork for InMemoryNetwork {
    async fn fetch(&self, request: &Request) -> anyhow::Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        if self.offline.load(Ordering::SeqCst) {
            return Err(OfflineError.into());
        }
        let routes = self.routes.lock().unwrap();
        Ok(routes
            .get(request.url.as_str())
            .cloned()
            .unwrap_or(Response {
                status: 404,
                headers: Vec::new(),
                body: Vec::new(),
            }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCall {
    Focus(String),
    Navigate(String, Url),
    Open(Url),
    Claim,
}

#[derive(Default)]
pub struct InMemoryClients {
    windows: Mutex<Vec<WindowClient>>,
    calls: Mutex<Vec<ClientCall>>,
}

impl InMemoryClients {
    pub fn add_window(&self, id: &str, url: Url) {
        self.windows.lock().unwrap().push(WindowClient {
            id: id.to_string(),
            url,
        });
    }

    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IClients for InMemoryClients {
    async fn windows(&self) -> anyhow::Result<Vec<WindowClient>> {
        Ok(self.windows.lock().unwrap().clone())
    }

    async fn focus(&self, client_id: &str) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(ClientCall::Focus(client_id.to_string()));
        Ok(())
    }

    async fn navigate(&self, client_id: &str, url: &Url) -> anyhow::Result<()> {
        let mut windows = self.windows.lock().unwrap();
        if let Some(window) = windows.iter_mut().find(|w| w.id == client_id) {
            window.url = url.clone();
        }
        self.calls
            .lock()
            .unwrap()
            .push(ClientCall::Navigate(client_id.to_string(), url.clone()));
        Ok(())
    }

    async fn open_window(&self, url: &Url) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(ClientCall::Open(url.clone()));
        Ok(())
    }

    async fn claim(&self) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(ClientCall::Claim);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRegistration {
    shown: Mutex<Vec<DisplayNotification>>,
    closed: Mutex<Vec<Option<String>>>,
    skipped_waiting: AtomicBool,
}

impl InMemoryRegistration {
    pub fn shown(&self) -> Vec<DisplayNotification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn closed(&self) -> Vec<Option<String>> {
        self.closed.lock().unwrap().clone()
    }

    pub fn skipped_waiting(&self) -> bool {
        self.skipped_waiting.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IRegistration for InMemoryRegistration {
    async fn show_notification(&self, notification: &DisplayNotification) -> anyhow::Result<()> {
        let mut shown = self.shown.lock().unwrap();
        // The OS replaces a notification that has the same tag
        if let Some(tag) = &notification.tag {
            shown.retain(|n| n.tag.as_ref() != Some(tag));
        }
        shown.push(notification.clone());
        Ok(())
    }

    async fn close_notification(&self, tag: Option<&str>) -> anyhow::Result<()> {
        let mut shown = self.shown.lock().unwrap();
        if let Some(tag) = tag {
            shown.retain(|n| n.tag.as_deref() != Some(tag));
        }
        self.closed.lock().unwrap().push(tag.map(String::from));
        Ok(())
    }

    async fn skip_waiting(&self) -> anyhow::Result<()> {
        self.skipped_waiting.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Keeps typed handles to the fakes behind a `WorkerContext`
#[derive(Default, Clone)]
pub struct InMemoryHost {
    pub caches: Arc<InMemoryCacheStorage>,
    pub network: Arc<InMemoryNetwork>,
    pub clients: Arc<InMemoryClients>,
    pub registration: Arc<InMemoryRegistration>,
}

impl InMemoryHost {
    pub fn context(&self, origin: Url) -> WorkerContext {
        WorkerContext {
            origin,
            caches: self.caches.clone(),
            network: self.network.clone(),
            clients: self.clients.clone(),
            registration: self.registration.clone(),
        }
    }
}
