use beacon_utils::create_random_secret;
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

/// Upper bound of how many notifications can be fetched in one page
pub const NOTIFICATIONS_PAGE_LIMIT_MAX: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret used to verify the session tokens issued by the
    /// authentication service
    pub session_secret: String,
    /// Key that producing subsystems (billing, post publishing, budget
    /// evaluators ..) present to enqueue notifications and reminders
    pub producer_api_key: String,
    /// How often the reminder scheduler looks for due reminders
    pub reminder_tick_interval_secs: u64,
    /// Page size used when a client does not ask for a specific limit
    pub notifications_page_limit: usize,
    /// How long a push service should keep an undelivered message
    pub push_ttl_secs: u32,
    /// How long a single push delivery may take before it is abandoned
    pub push_timeout_secs: u64,
    /// PEM encoded P-256 key the push messages are signed with
    pub vapid_private_key: Option<String>,
    /// Contact of the operator sent along in the VAPID claims
    pub vapid_subject: String,
}

fn secret_from_env(name: &str) -> String {
    match std::env::var(name) {
        Ok(secret) => secret,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                name
            );
            let secret = create_random_secret(32);
            info!("{} was generated and set to: {}", name, secret);
            secret
        }
    }
}

fn parse_from_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let notifications_page_limit = parse_from_env("NOTIFICATIONS_PAGE_LIMIT", 20usize)
            .clamp(1, NOTIFICATIONS_PAGE_LIMIT_MAX);
        Self {
            port: parse_from_env("PORT", 5000),
            session_secret: secret_from_env("SESSION_SECRET"),
            producer_api_key: secret_from_env("PRODUCER_API_KEY"),
            reminder_tick_interval_secs: parse_from_env("REMINDER_TICK_INTERVAL_SECS", 60u64)
                .max(1),
            notifications_page_limit,
            push_ttl_secs: parse_from_env("PUSH_TTL_SECS", 60 * 60 * 24),
            push_timeout_secs: parse_from_env("PUSH_TIMEOUT_SECS", 10u64).max(1),
            vapid_private_key: std::env::var("VAPID_PRIVATE_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            vapid_subject: std::env::var("VAPID_SUBJECT")
                .unwrap_or_else(|_| "mailto:admin@localhost".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_falls_back_to_default_on_garbage() {
        std::env::set_var("BEACON_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(parse_from_env("BEACON_TEST_GARBAGE_PORT", 5000usize), 5000);
        std::env::set_var("BEACON_TEST_VALID_PORT", "8080");
        assert_eq!(parse_from_env("BEACON_TEST_VALID_PORT", 5000usize), 8080);
        assert_eq!(parse_from_env("BEACON_TEST_MISSING", 7u64), 7);
    }

    #[test]
    fn it_generates_missing_secrets() {
        let config = Config::new();
        assert!(!config.session_secret.is_empty());
        assert!(config.notifications_page_limit <= NOTIFICATIONS_PAGE_LIMIT_MAX);
    }
}
