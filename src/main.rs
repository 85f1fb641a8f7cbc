use axum::Router;
use tracing_subscriber::EnvFilter;

use ipl_dashboard::config::AppConfig;
use ipl_dashboard::database::connection::match_repository;
use ipl_dashboard::routes;
use ipl_dashboard::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let matches = match_repository(&config).await;
    let app = routes::router(AppState::new(matches));

    start_server(app, &config).await
}

async fn start_server(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Server is running on port {}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
