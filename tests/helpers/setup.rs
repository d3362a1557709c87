use beacon_api::{Application, Claims};
use beacon_domain::{PushPayload, PushSubscription};
use beacon_infra::{BeaconContext, Config, InMemoryPushGateway, ManualSys};
use beacon_sdk::{BeaconSDK, Session, ID};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::{sync::Arc, time::Duration};

pub struct TestApp {
    pub config: Config,
    pub ctx: BeaconContext,
    pub sys: Arc<ManualSys>,
    pub push_gateway: Arc<InMemoryPushGateway>,
    pub address: String,
}

impl TestApp {
    /// Sdk acting as the given user with a freshly issued session
    pub fn user_sdk(&self, owner_id: &ID) -> BeaconSDK {
        let now = chrono::Utc::now();
        let expires_at = now + chrono::Duration::hours(1);
        let claims = Claims {
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            user_id: owner_id.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.session_secret.as_bytes()),
        )
        .expect("Expected to sign session token");
        BeaconSDK::new(
            self.address.clone(),
            Session::new(token, expires_at.timestamp_millis()),
        )
    }

    /// Push delivery happens in the background, gives it a moment to reach
    /// the expected number of messages
    pub async fn pushed(&self, expected: usize) -> Vec<(PushSubscription, PushPayload)> {
        for _ in 0..40 {
            let sent = self.push_gateway.sent();
            if sent.len() >= expected {
                return sent;
            }
            actix_web::rt::time::sleep(Duration::from_millis(25)).await;
        }
        self.push_gateway.sent()
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, BeaconSDK, String) {
    let mut ctx = BeaconContext::create_inmemory();
    ctx.config.port = 0; // Random port
    // Tests run the scheduler by hand
    ctx.config.reminder_tick_interval_secs = 60 * 60;
    let sys = Arc::new(ManualSys::new(chrono::Utc::now().timestamp_millis()));
    ctx.sys = sys.clone();
    let push_gateway = Arc::new(InMemoryPushGateway::new());
    ctx.services.push_gateway = push_gateway.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let producer = BeaconSDK::producer(address.clone(), config.producer_api_key.clone());
    let app = TestApp {
        config,
        ctx,
        sys,
        push_gateway,
        address: address.clone(),
    };
    (app, producer, address)
}
