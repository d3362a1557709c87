mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, NOTIFICATIONS_PAGE_LIMIT_MAX};
pub use repos::{
    DeleteResult, INotificationRepo, IPreferenceRepo, IPushSubscriptionRepo, IReminderRepo, Repos,
};
pub use services::{
    IPushGateway, InAppHub, InMemoryPushGateway, PushError, Services, WebPushGateway,
};
use std::sync::Arc;
pub use system::{ISys, ManualSys, RealSys};
use tracing::warn;

#[derive(Clone)]
pub struct BeaconContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl BeaconContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();
        let repos = Repos::create_postgres(&params.postgres_connection_string).await?;
        let services = Services::create(&config)?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            services,
        })
    }

    /// Context backed by in memory repositories and a recording push gateway
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            services: Services::create_inmemory(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<BeaconContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(postgres_connection_string) => {
            BeaconContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        Err(_) => {
            warn!(
                "{} env var was not present, falling back to in memory storage. Nothing will be persisted.",
                PSQL_CONNECTION_STRING
            );
            Ok(BeaconContext::create_inmemory())
        }
    }
}
