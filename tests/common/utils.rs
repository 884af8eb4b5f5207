use std::net::TcpListener;
use std::sync::Arc;
use once_cell::sync::Lazy;

use pingpong_league_backend::run;
use pingpong_league_backend::db::{InMemoryStore, Store};
use pingpong_league_backend::league::MatchSystemCatalog;
use pingpong_league_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: InMemoryStore,
}

impl TestApp {
    pub fn api(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }
}

/// Every test gets its own server and its own empty store.
pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = InMemoryStore::new();
    let shared: Arc<dyn Store> = Arc::new(store.clone());
    let server = run(listener, shared, vec!["http://localhost:3000".to_string()])
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp { address, store }
}

/// Same as `spawn_app`, with the predefined match systems already stored.
pub async fn spawn_app_with_match_systems() -> TestApp {
    let app = spawn_app().await;
    MatchSystemCatalog::new()
        .seed_predefined(&app.store)
        .await
        .expect("Failed to seed match systems");
    app
}
