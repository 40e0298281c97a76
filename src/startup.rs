use std::net::TcpListener;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::chat_client::ChatClient;
use crate::configuration::{CorsSettings, Settings, StaticFilesSettings};
use crate::email_client::EmailClient;
use crate::routes;
use crate::routes::send_email::{json_error_handler, NotifierFailureStatus};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Wire every collaborator and bind the listener.
    ///
    /// Fails on incomplete chat webhook settings or a missing static directory.
    pub fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration
            .email_client
            .client()
            .map_err(anyhow::Error::msg)
            .context("Invalid email client configuration")?;
        let chat_client = configuration
            .chat_webhook
            .client()
            .map_err(anyhow::Error::msg)
            .context("Invalid chat webhook configuration")?;
        let static_files = StaticMount::new(&configuration.application.static_files)?;
        let failure_status =
            NotifierFailureStatus::new(configuration.application.legacy_failure_status);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_client,
            chat_client,
            static_files,
            configuration.application.cors,
            failure_status,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// A static directory served under a fixed route prefix.
#[derive(Clone, Debug)]
pub struct StaticMount {
    route: String,
    directory: PathBuf,
}

impl StaticMount {
    pub fn new(settings: &StaticFilesSettings) -> Result<Self, anyhow::Error> {
        let directory = PathBuf::from(&settings.directory);
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            route: format!("/{}", settings.mount_path.trim_matches('/')),
            directory,
        })
    }
}

fn cors(settings: &CorsSettings) -> Cors {
    let cors = Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    if settings.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    chat_client: ChatClient,
    static_files: StaticMount,
    cors_settings: CorsSettings,
    failure_status: NotifierFailureStatus,
) -> Result<Server, std::io::Error> {
    let email_client = Data::new(email_client);
    let chat_client = Data::new(chat_client);
    let failure_status = Data::new(failure_status);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_settings))
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/", web::get().to(routes::home::home))
            .route("/send_email", web::post().to(routes::send_email::send_email))
            .service(Files::new(&static_files.route, &static_files.directory))
            .app_data(email_client.clone())
            .app_data(chat_client.clone())
            .app_data(failure_status.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
