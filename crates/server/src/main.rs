mod api;
mod app_config;
mod cli;
mod router;
mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

async fn serve(config: &debtdesk_core::Config) -> anyhow::Result<()> {
    config.log_summary();
    let state = app_config::build_app_state(config);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Server is running on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    let config = app_config::load_config();
    let args: Vec<String> = std::env::args().collect();

    if cli::dispatch(&config, &args)? {
        return Ok(());
    }
    serve(&config).await
}
