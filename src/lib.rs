pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod queries;
pub mod router;
pub mod services;
pub mod state;
pub mod validation;

pub use config::Config;
pub use database::{DocumentStore, MemoryStore, MongoStore};
pub use error::{Error, Result};
pub use router::build_router;
pub use state::AppState;

/// Load configuration from environment variables
pub fn load_config() -> std::result::Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::load()?)
}
