use axum::Router;
use configs::AppConfig;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

/// Build state and router from configuration.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = ServerState::from_config(&cfg.store);
    info!(
        things = state.things.store().len(),
        ventures = state.ventures.store().len(),
        "stores ready"
    );
    routes::build_router(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
