use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use pingpong_league_backend::run;
use pingpong_league_backend::config::settings::{get_config, Settings, StorageBackend};
use pingpong_league_backend::db::{InMemoryStore, PgStore, Store};
use pingpong_league_backend::league::MatchSystemCatalog;
use pingpong_league_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "pingpong-league-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let store = match build_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("❌ Failed to initialise the competition store: {}", e);
            std::process::exit(1);
        }
    };

    if config.application.seed_match_systems {
        if let Err(e) = MatchSystemCatalog::new().seed_predefined(store.as_ref()).await {
            tracing::error!("❌ Failed to seed predefined match systems: {}", e);
            std::process::exit(1);
        }
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, store, config.application.allowed_origins.clone())?.await
}

async fn build_store(config: &Settings) -> Result<Arc<dyn Store>, pingpong_league_backend::errors::CompetitionError> {
    match config.application.storage {
        StorageBackend::Memory => {
            tracing::info!("Using the in-memory competition store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Postgres => {
            // Only try to establish connection when actually used
            let connection_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect_lazy(config.database.connection_string().expose_secret())?;
            let store = PgStore::new(connection_pool);
            store.migrate().await?;
            tracing::info!("✅ Database migrations applied");
            Ok(Arc::new(store))
        }
    }
}
