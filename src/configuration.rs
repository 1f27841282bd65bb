//! Layered settings: built-in defaults, an optional `base` file in the
//! configuration directory, then `TRIVIA_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

pub fn get_configuration(config_dir: &Path) -> Result<Settings, config::ConfigError> {
    dotenv::dotenv().ok();

    config::Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.path", "trivia.db")?
        .add_source(config::File::from(config_dir.join("base")).required(false))
        .add_source(
            config::Environment::with_prefix("TRIVIA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        // older deployments only set DB_PATH
        .set_override_option("database.path", dotenv::var("DB_PATH").ok())?
        .build()?
        .try_deserialize()
}
