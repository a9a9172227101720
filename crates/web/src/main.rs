use anyhow::Context;
use storage::Database;
use web::{app, config::Config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting shooting results API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let state = match config.database_url.as_deref() {
        Some(database_url) => {
            tracing::info!(
                "Using database at: {}",
                config.database_host().unwrap_or("unknown")
            );
            let db = Database::new(database_url, config.max_connections, config.acquire_timeout)
                .context("Failed to initialize database pool")?;

            if config.run_migrations {
                tracing::info!("Running database migrations");
                db.run_migrations()
                    .await
                    .context("Failed to run migrations")?;
                tracing::info!("Database migrations completed successfully");
            }

            AppState::new(db)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, result requests will answer with 500");
            AppState::unconfigured()
        }
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!(configured = state.is_configured(), "Starting server at http://{}", bind_address);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
