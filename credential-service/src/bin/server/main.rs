use std::sync::Arc;

use auth::Authenticator;
use auth::HashCost;
use auth::PasswordHasher;
use auth::TokenAuthority;
use credential_service::config::Config;
use credential_service::credential::ports::CredentialServicePort;
use credential_service::credential::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use credential_service::repositories::InMemoryCredentialStore;
use credential_service::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;

    tracing::info!(
        http_port = config.server.http_port,
        database_configured = config.database.url.is_some(),
        token_ttl_minutes = config.token.ttl_minutes,
        password_memory_kib = config.password.memory_kib,
        password_iterations = config.password.iterations,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::from_parts(
        PasswordHasher::with_cost(HashCost::from(&config.password)),
        TokenAuthority::new(
            config.token.secret.as_bytes(),
            config.token.ttl()?,
        ),
    ));

    let credential_service: Arc<dyn CredentialServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = Arc::new(PostgresCredentialStore::new(pg_pool));
            Arc::new(CredentialService::new(store, authenticator))
        }
        None => {
            tracing::warn!("No database configured, credentials are kept in memory");
            let store = Arc::new(InMemoryCredentialStore::new());
            Arc::new(CredentialService::new(store, authenticator))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(credential_service)).await?;

    tracing::info!("Server exited");

    Ok(())
}
