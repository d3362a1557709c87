//! Background agent that runs next to a Beacon client even while no page of
//! the application is open. It renders push messages as OS notifications,
//! routes notification clicks back into the application and keeps an offline
//! copy of the application shell.
//!
//! The hosting runtime is reached through the traits in [`host`], and every
//! runtime event is routed through [`dispatch`].

mod event;
mod handlers;
pub mod host;
pub mod inmemory;

use beacon_domain::{DEFAULT_BADGE, DEFAULT_ICON};
pub use event::{dispatch, handler_for, EventOutcome, Handler, WorkerEvent, HANDLERS};
use host::{ICacheStorage, IClients, INetwork, IRegistration};
use std::sync::Arc;
use url::Url;

/// Bumping this invalidates every cache written by older worker versions
pub const CACHE_NAME: &str = "beacon-shell-v1";

/// Requests under this path always go to the network
pub const API_PATH_PREFIX: &str = "/api/";

/// Assets cached on install so that the application shell loads offline
pub const SHELL_ASSETS: [&str; 5] = [
    "/",
    "/index.html",
    "/manifest.json",
    DEFAULT_ICON,
    DEFAULT_BADGE,
];

#[derive(Clone)]
pub struct WorkerContext {
    /// Origin the worker was registered on, relative action urls resolve against it
    pub origin: Url,
    pub caches: Arc<dyn ICacheStorage>,
    pub network: Arc<dyn INetwork>,
    pub clients: Arc<dyn IClients>,
    pub registration: Arc<dyn IRegistration>,
}
