//! Pokémon review backend: CRUD over Pokémon, owners, countries, categories,
//! reviews and reviewers, stored in PostgreSQL or in memory.

pub mod api_docs;
pub mod config;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreKind};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore};
