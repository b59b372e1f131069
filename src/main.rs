use gestiones_sac::{open_sheet, router, AppState, Catalog, Settings};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env()?;
    let catalog = Catalog::load(&settings.catalog_path).await?;
    let state = AppState::new(open_sheet(&settings.sheet), catalog);

    info!(
        backend = state.records.backend_kind(),
        managers = state.catalog.managers.len(),
        activities = state.catalog.activities.len(),
        "starting gestiones_sac"
    );

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
