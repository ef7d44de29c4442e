// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Display names allowed to run admin commands.
    pub admin_users: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        // Comma-separated allow-list, e.g. ADMIN_USERS="alice,bob"
        let admin_users = env::var("ADMIN_USERS")
            .unwrap_or_default()
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            admin_users,
            rust_log,
        }
    }

    /// Authorization predicate for admin-only commands.
    pub fn is_admin(&self, sender: &str) -> bool {
        self.admin_users.iter().any(|name| name == sender)
    }
}
