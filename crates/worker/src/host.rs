use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    pub url: Url,
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self {
            method: "GET".into(),
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Named response caches owned by the hosting runtime
#[async_trait]
pub trait ICacheStorage: Send + Sync {
    async fn keys(&self) -> anyhow::Result<Vec<String>>;
    /// Returns false when no cache with that name existed
    async fn delete(&self, cache_name: &str) -> anyhow::Result<bool>;
    async fn put(&self, cache_name: &str, request: &Request, response: Response)
        -> anyhow::Result<()>;
    /// Looks the request up across every cache
    async fn find(&self, request: &Request) -> Option<Response>;
}

#[async_trait]
pub trait INetwork: Send + Sync {
    async fn fetch(&self, request: &Request) -> anyhow::Result<Response>;
}

/// An application window controlled by this worker
#[derive(Debug, Clone, PartialEq)]
pub struct WindowClient {
    pub id: String,
    pub url: Url,
}

#[async_trait]
pub trait IClients: Send + Sync {
    async fn windows(&self) -> anyhow::Result<Vec<WindowClient>>;
    async fn focus(&self, client_id: &str) -> anyhow::Result<()>;
    async fn navigate(&self, client_id: &str, url: &Url) -> anyhow::Result<()>;
    async fn open_window(&self, url: &Url) -> anyhow::Result<()>;
    /// Takes control of every open window without a reload
    async fn claim(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// What the operating system is asked to show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub renotify: bool,
    pub require_interaction: bool,
    pub actions: Vec<NotificationAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

/// The worker's own registration with the hosting runtime
#[async_trait]
pub trait IRegistration: Send + Sync {
    async fn show_notification(&self, notification: &DisplayNotification) -> anyhow::Result<()>;
    async fn close_notification(&self, tag: Option<&str>) -> anyhow::Result<()>;
    /// Activates a waiting worker without waiting for old instances to go away
    async fn skip_waiting(&self) -> anyhow::Result<()>;
}
