mod in_app_hub;
mod push_gateway;

use crate::config::Config;
pub use in_app_hub::InAppHub;
pub use push_gateway::{IPushGateway, InMemoryPushGateway, PushError, WebPushGateway};
use std::sync::Arc;

/// Outbound transports used when dispatching notifications
#[derive(Clone)]
pub struct Services {
    pub push_gateway: Arc<dyn IPushGateway>,
    pub in_app: Arc<InAppHub>,
}

impl Services {
    pub fn create(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            push_gateway: Arc::new(WebPushGateway::new(config)?),
            in_app: Arc::new(InAppHub::new()),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            push_gateway: Arc::new(InMemoryPushGateway::new()),
            in_app: Arc::new(InAppHub::new()),
        }
    }
}
