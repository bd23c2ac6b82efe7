use std::env;

use crate::constants::{DEFAULT_DATABASE_NAME, ENV_DATABASE_NAME, ENV_DATABASE_URI};
use crate::errors::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_uri: String,
    pub database_name: String,
}

impl Config {
    /// Resolves the connection settings from the environment. Re-read on every
    /// cache miss, so fixing the environment heals the next acquire.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        let database_uri = env::var(ENV_DATABASE_URI)
            .map_err(|_| Error::Configuration(format!("{ENV_DATABASE_URI} is not set")))?;
        let database_name =
            env::var(ENV_DATABASE_NAME).unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());

        Ok(Self {
            database_uri,
            database_name,
        })
    }
}
