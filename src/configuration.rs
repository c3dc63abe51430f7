use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub log_level: String,
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Defaults, then `TRIVIA_*` variables, then a bare `DATABASE_URL` on top.
pub fn get_settings() -> Result<Settings, ConfigError> {
    dotenv::dotenv().ok();
    build_settings(None, dotenv::var("DATABASE_URL").ok())
}

/// `variables` replaces the process environment when given.
fn build_settings(
    variables: Option<Map<String, String>>,
    database_url: Option<String>,
) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", 8080)?
        .set_default("log_level", "info")?
        .add_source(
            Environment::with_prefix("TRIVIA")
                .try_parsing(true)
                .source(variables),
        )
        .set_override_option("database_url", database_url)?
        .build()?
        .try_deserialize()
}
