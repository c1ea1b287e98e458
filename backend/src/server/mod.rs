//! Server construction and wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc::Receiver;
use tracing::info;

#[cfg(debug_assertions)]
use project_hub::doc::ApiDoc;
use project_hub::domain::NotificationEvent;
use project_hub::inbound::http::configure_api;
use project_hub::inbound::http::health::{HealthState, live, ready};
use project_hub::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::{BuiltState, build_http_state};

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// A bound server and the notification receiver its dispatcher should drain.
pub struct Running {
    pub server: Server,
    pub notifications: Receiver<NotificationEvent>,
}

/// Wire adapters, bind the listener, and return the unstarted server future.
///
/// # Errors
/// Fails when settings are malformed, the directory seed cannot be loaded, or
/// the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> Result<Running> {
    let bind_addr = settings.bind_addr()?;
    let BuiltState {
        http_state,
        notifications,
    } = build_http_state(settings)?;
    let http_state = web::Data::new(http_state);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?
        .run();

    info!(%bind_addr, "http server bound");
    Ok(Running {
        server,
        notifications,
    })
}
