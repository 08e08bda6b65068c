//! Startup orchestration.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Settings;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};

/// Bind, serve until a shutdown signal, then drain.
pub async fn run(settings: Arc<Settings>) -> Result<(), std::io::Error> {
    tracing::info!(
        environment = %settings.environment,
        debug = settings.debug,
        "Starting {} v{}",
        settings.app_name,
        settings.app_version
    );

    let listener = TcpListener::bind(settings.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(settings);
    let server_shutdown = shutdown.subscribe();

    let mut serving = tokio::spawn(server.run(listener, server_shutdown));

    let stopped_early = tokio::select! {
        joined = &mut serving => Some(joined),
        _ = signals::wait_for_signal() => None,
    };
    let joined = match stopped_early {
        Some(joined) => joined,
        None => {
            shutdown.trigger();
            serving.await
        }
    };

    match joined {
        Ok(result) => result?,
        Err(e) => tracing::error!(error = %e, "Server task aborted"),
    }

    tracing::info!("Application shutdown completed");
    Ok(())
}
