use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub questions_per_page: i64,
    /// Create the SQLite file when it does not exist yet
    pub create_database: bool,
}

impl Settings {
    /// Defaults, then an optional `trivia.toml`, then `TRIVIA_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let settings: Settings = Self::builder()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA"))
            .build()?
            .try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.questions_per_page < 1 {
            return Err(ConfigError::Message(format!(
                "questions_per_page must be at least 1, got {}",
                self.questions_per_page
            )));
        }
        Ok(self)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("bind_address", "0.0.0.0:8080")?
            .set_default("questions_per_page", 10)?
            .set_default("create_database", true)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "sqlite:trivia.db".to_owned(),
            bind_address: "0.0.0.0:8080".to_owned(),
            questions_per_page: 10,
            create_database: true,
        }
    }
}
