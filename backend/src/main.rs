//! Project hub entry-point: loads settings, wires adapters, and serves the
//! REST API with OpenAPI docs in debug builds.

mod server;

use std::time::Duration;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use project_hub::inbound::http::health::HealthState;
use project_hub::outbound::notifications::run_notification_dispatcher;

use server::{Running, ServerSettings, create_server};

const DISPATCHER_DRAIN: Duration = Duration::from_secs(5);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load server settings")?;

    let health_state = web::Data::new(HealthState::new());
    let Running {
        server,
        notifications,
    } = create_server(health_state.clone(), &settings)?;

    let dispatcher = actix_web::rt::spawn(run_notification_dispatcher(notifications));
    health_state.mark_ready();

    let outcome = server.await;
    health_state.mark_unhealthy();
    match tokio::time::timeout(DISPATCHER_DRAIN, dispatcher).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "notification dispatcher task failed"),
        Err(_) => warn!("notification dispatcher still draining at shutdown"),
    }
    info!("server stopped");
    outcome.wrap_err("http server failed")
}
