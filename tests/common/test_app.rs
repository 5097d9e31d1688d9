use std::{net::SocketAddr, sync::Arc};

use portfolio::{
    build_router,
    config::{Config, RunMode},
    AppState, DocumentStore, MemoryStore,
};
use reqwest::Client;
use tokio::net::TcpListener;

/// Which store the test server is wired to
pub enum TestStore {
    /// Fresh in-memory store, exposed as `TestApp::store`
    Memory,
    /// No store configured at all
    Disconnected,
    /// A custom test double
    Custom(Arc<dyn DocumentStore>),
}

/// Options for building a [`TestApp`]
pub struct TestAppOptions {
    pub store: TestStore,
    pub environment: RunMode,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            store: TestStore::Memory,
            environment: RunMode::Production,
        }
    }
}

impl TestAppOptions {
    pub fn disconnected() -> Self {
        Self {
            store: TestStore::Disconnected,
            ..Self::default()
        }
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store: TestStore::Custom(store),
            ..Self::default()
        }
    }

    pub fn development(mut self) -> Self {
        self.environment = RunMode::Development;
        self
    }
}

/// HTTP test application wrapper
///
/// Runs the real router on a random port. Each test gets its own server
/// and its own store, so tests can run in parallel.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
    /// Application config the router was built with
    pub config: Config,
    /// Backing store when running with `TestStore::Memory`
    pub store: Option<Arc<MemoryStore>>,
}

impl TestApp {
    /// Server backed by a fresh in-memory store
    ///
    /// # Example
    /// ```rust
    /// #[tokio::test]
    /// async fn test_health_endpoint() {
    ///     let app = TestApp::new().await;
    ///
    ///     let response = app.client
    ///         .get(&app.url("/api/health"))
    ///         .send()
    ///         .await
    ///         .unwrap();
    ///
    ///     assert_eq!(response.status(), 200);
    /// }
    /// ```
    pub async fn new() -> Self {
        Self::new_with_options(TestAppOptions::default()).await
    }

    pub async fn new_with_options(options: TestAppOptions) -> Self {
        let mut config = Config::default();
        config.app.environment = options.environment;

        let (store, memory): (Option<Arc<dyn DocumentStore>>, Option<Arc<MemoryStore>>) =
            match options.store {
                TestStore::Memory => {
                    let memory = Arc::new(MemoryStore::new());
                    (Some(memory.clone()), Some(memory))
                }
                TestStore::Disconnected => (None, None),
                TestStore::Custom(store) => (Some(store), None),
            };

        let app = build_router(AppState::new(store), &config).expect("Failed to build router");

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        // Start server in background
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            config,
            store: memory,
        }
    }

    /// Get the full URL for an API endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// The in-memory store; panics for apps built without one
    pub fn memory_store(&self) -> &MemoryStore {
        self.store.as_deref().expect("TestApp was built without a memory store")
    }
}
