// src/config/settings.rs
//
// Runtime settings come from the environment (optionally via a .env file).
// Everything else is compile-time consts, see consts.rs.

use std::env;

use thiserror::Error;

const DB_URL_VAR: &str = "SUPABASE_URL";
const DB_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}

/// Hosted database endpoint + service credential (admin writes).
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_url: String,
    pub db_service_key: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        // Best-effort: running without a .env file is fine.
        let _ = dotenvy::dotenv();

        let db_url = env::var(DB_URL_VAR).map_err(|_| SettingsError::Missing(DB_URL_VAR))?;
        let db_service_key =
            env::var(DB_KEY_VAR).map_err(|_| SettingsError::Missing(DB_KEY_VAR))?;

        Ok(Self { db_url, db_service_key })
    }
}
