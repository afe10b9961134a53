use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9090";
const DEFAULT_LOG_LEVEL: &str = "info";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    pub log_level: String,
    /// Log every SQL statement issued through SeaORM.
    pub log_persistence: bool,

    pub oidc_issuer_url: String,
    pub oidc_client_id: String,
    pub oidc_client_secret: String,
    pub oidc_redirect_url: String,
    /// Require a bearer token on `GET /{entities}/{id}` and `DELETE /{entities}/{id}` too.
    pub oidc_protect_all_routes: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = required("DATABASE_URL")?;
        check_database_driver(&database_url)?;

        Ok(Self {
            database_url,
            bind_address: optional("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into()),
            log_level: optional("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            log_persistence: flag("LOG_PERSISTENCE")?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            oidc_client_id: required("OIDC_CLIENT_ID")?,
            oidc_client_secret: required("OIDC_CLIENT_SECRET")?,
            oidc_redirect_url: required("OIDC_REDIRECT_URL")?,
            oidc_protect_all_routes: flag("OIDC_PROTECT_ALL_ROUTES")?,
        })
    }
}

/// Accepts only the SQLite and MySQL drivers compiled into SeaORM.
pub fn check_database_driver(database_url: &str) -> Result<(), ConfigError> {
    let driver = database_url.split(':').next().unwrap_or_default();

    match driver {
        "sqlite" | "mysql" => Ok(()),
        other => Err(ConfigError::UnsupportedDatabase(other.to_string())),
    }
}

/// Parses a boolean flag, absent meaning `false`.
pub fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn flag(name: &str) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_flag(name, &value),
        Err(_) => Ok(false),
    }
}
