use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bucket_console::config::{self, Credentials};
use bucket_console::{create_router, drivers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bucket_console=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // .env in the working directory, if any; real env vars take precedence
    if let Some(path) = config::load_env_file() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // Credentials first: nothing is served without all three / 校验凭证
    let credentials = Credentials::from_env().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    // Load configuration / 加载配置
    let app_config = config::load_config()?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    let store = drivers::connect(&credentials, &app_config.storage)?;
    let state = Arc::new(AppState::new(store, credentials.region.clone(), &app_config));

    let app = create_router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
