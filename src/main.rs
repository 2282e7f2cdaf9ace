use anyhow::Context;
use farmtours::{router, AppState, Config, Store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,farmtours=debug,tower_http=debug")),
        )
        .init();

    let store = Store::connect(&config)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;

    let app = router(AppState { store: store.clone() }, &config.api_path);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, path = %config.api_path, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;

    store.close().await;
    Ok(())
}
