//! Backend entry-point: loads settings, prepares the user store and serves
//! the REST API with its OpenAPI docs.

mod server;

use std::fmt::Display;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backrub::inbound::http::health::HealthState;
use backrub::outbound::persistence::{DbPool, run_migrations};
use server::{AppSettings, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

fn startup_error(stage: &'static str, err: &dyn Display) -> io::Error {
    error!(stage, error = %err, "startup failed");
    io::Error::other(format!("{stage}: {err}"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("configuration", &err))?;

    let mut config = settings.server_config();
    if let Some(pool_config) = settings.pool_config() {
        run_migrations(pool_config.database_url())
            .await
            .map_err(|err| startup_error("migrations", &err))?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| startup_error("connection pool", &err))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .map_err(|err| startup_error("bind", &err))?;
    info!(host = %settings.host, port = settings.port, "server listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received; draining");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await
}
