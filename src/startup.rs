use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, EmailClientSettings, Settings};
use crate::email_client::EmailClient;
use crate::notification::ContactNotifier;
use crate::routes::{
    handle_create_submission, handle_list_submissions, health_check, json_error_handler,
    query_error_handler, AdminKey,
};
use crate::store::{PgSubmissionStore, SubmissionStore};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, io::Error> {
        let store = PgSubmissionStore::new(get_connection_db_pool(&config.database));
        let notifier = build_notifier(config.email_client.as_ref())?;
        let admin_key = AdminKey::new(config.get_admin_key());

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, Arc::new(store), notifier, admin_key)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn SubmissionStore>,
    notifier: ContactNotifier,
    admin_key: AdminKey,
) -> Result<Server, io::Error> {
    let store: web::Data<dyn SubmissionStore> = web::Data::from(store);
    let notifier = web::Data::new(notifier);
    let admin_key = web::Data::new(admin_key);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/contact")
                    .route(web::post().to(handle_create_submission))
                    .route(web::get().to(handle_list_submissions)),
            )
            .app_data(store.clone())
            .app_data(notifier.clone())
            .app_data(admin_key.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// The pool connects lazily; the first request opens the first connection.
pub fn get_connection_db_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}

pub fn build_notifier(
    settings: Option<&EmailClientSettings>,
) -> Result<ContactNotifier, io::Error> {
    let Some(settings) = settings else {
        tracing::warn!("Email client is not configured, contact notifications are disabled");
        return Ok(ContactNotifier::disabled());
    };

    let sender = settings.get_sender_email().map_err(invalid_config)?;
    let notification_address = settings.get_notification_email().map_err(invalid_config)?;
    let email_client = EmailClient::new(
        settings.get_base_url(),
        sender,
        settings.get_api_key(),
        settings.get_timeout(),
    )
    .map_err(invalid_config)?;

    if notification_address.is_none() {
        tracing::warn!("No notification email configured, operator alerts are disabled");
    }

    Ok(ContactNotifier::new(
        Some(email_client),
        notification_address,
        settings.signature_name.clone(),
    ))
}

fn invalid_config(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("Invalid email client configuration: {}", err),
    )
}
