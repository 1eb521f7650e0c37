use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inquiry_backend::config::AppConfig;
use inquiry_backend::create_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "inquiry_backend=info,tower_http=info,sqlx=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().await?;

    sqlx::migrate!().run(&config.database_pool).await?;

    let app = create_app(config.clone());

    let addr: std::net::SocketAddr = config.server_address().parse()?;
    tracing::info!("Starting inquiry backend on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
