mod error;
mod job_schedulers;
mod notification;
mod preference;
mod push_subscription;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use beacon_infra::BeaconContext;
pub use job_schedulers::send_due_reminders;
use job_schedulers::start_send_reminders_job;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use reminder::send_due_reminders::{SendDueRemindersOutcome, SendDueRemindersUseCase};
pub use shared::auth::Claims;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    preference::configure_routes(cfg);
    notification::configure_routes(cfg);
    push_subscription::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: BeaconContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: BeaconContext) {
        start_send_reminders_job(context);
    }

    async fn configure_server(context: BeaconContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Listening on port: {}", port);

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
