/// Database configuration and connection management
pub mod database;

/// AI provider settings loaded from environment variables
pub mod gateway;

/// Business settings (store location, quotas, rewards) from settings.toml
pub mod store;
