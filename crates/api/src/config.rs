use std::env;

use anyhow::{Context, Result};

use crate::services::notification_hub::DEFAULT_CHANNEL_CAPACITY;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Runtime configuration, read from the environment (after `.env` is loaded).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// Postgres connection string. Without it the server runs on the memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub skip_migrations: bool,
    pub seed_demo_data: bool,
    pub introspection_enabled: bool,
    pub allowed_origins: Vec<String>,
    pub hub_channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            database_max_connections: 30,
            skip_migrations: false,
            seed_demo_data: true,
            introspection_enabled: false,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
            hub_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        // Seeding defaults on only for the throwaway memory store.
        let seed_default = database_url.is_none();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .context("PORT must be a valid port number")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            skip_migrations: flag("SKIP_MIGRATIONS").unwrap_or(false),
            seed_demo_data: flag("SEED_DEMO_DATA").unwrap_or(seed_default),
            introspection_enabled: flag("GQL_INTROSPECTION").unwrap_or(false),
            allowed_origins: split_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.into()),
            ),
            hub_channel_capacity: env::var("HUB_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            database_url,
        })
    }
}

fn flag(name: &str) -> Option<bool> {
    env::var(name).ok().map(|v| v.eq_ignore_ascii_case("true"))
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
