#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::HttpRepository;
#[cfg(feature = "server")]
use crate::routes::main::show_index;
#[cfg(feature = "server")]
use crate::routes::registration::{registration_index, show_registration, submit_registration};
#[cfg(feature = "server")]
use crate::routes::visualization::{
    edit_modal, refresh_visualization, save_record, show_visualization,
};
#[cfg(feature = "server")]
use crate::services::visualization::LedgerStore;
#[cfg(feature = "server")]
use crate::shell::Shell;

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "data")]
pub mod shell;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Single API client shared by every worker; the base URL is fixed at startup.
    let repo = HttpRepository::new(
        &server_config.api_base_url,
        server_config.request_timeout_secs.map(Duration::from_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    log::info!("Using loyalty API at {}", repo.base_url());

    let shell = web::Data::new(Shell::new());
    let store = web::Data::new(LedgerStore::new());

    let secret_key = Key::from(server_config.secret.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_index)
            .service(registration_index)
            .service(show_registration)
            .service(submit_registration)
            .service(show_visualization)
            .service(refresh_visualization)
            .service(edit_modal)
            .service(save_record)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(shell.clone())
            .app_data(store.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
