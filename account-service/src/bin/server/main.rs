use std::sync::Arc;
use std::time::Duration;

use account_service::config::Config;
use account_service::domain::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::repositories::PostgresResetTokenRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        acquire_timeout_seconds = config.database.acquire_timeout_seconds,
        expose_reset_token = config.reset.expose_token,
        "Configuration loaded"
    );

    if config.reset.expose_token {
        tracing::warn!("Reset tokens will be echoed in responses (dev mode); never enable this in production");
    }

    // Bounded acquire timeout keeps store calls from blocking indefinitely.
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
        .connect(&config.database.url)
        .await?;
    tracing::info!(database = "postgresql", "Database connection pool created");

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let accounts = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let reset_tokens = Arc::new(PostgresResetTokenRepository::new(pg_pool));
    let auth_service = Arc::new(AuthService::new(accounts, reset_tokens));

    // Periodic sweep of expired reset tokens; nothing else ever deletes the
    // ones that are never redeemed.
    let sweep_interval = Duration::from_secs(config.reset.sweep_interval_minutes * 60);
    let reaper = Arc::clone(&auth_service);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        interval.tick().await; // first tick completes immediately
        loop {
            interval.tick().await;
            match reaper.purge_expired_tokens().await {
                Ok(0) => {}
                Ok(swept) => tracing::info!(swept, "Expired reset tokens removed"),
                Err(e) => tracing::error!(error = %e, "Reset token sweep failed"),
            }
        }
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(auth_service, config.reset.expose_token);
    axum::serve(http_listener, application).await?;

    Ok(())
}
