use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Deserializer};
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// TLS mode for the database connection. Certificates are never verified.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DbSslMode {
    Disable,
    Prefer,
    Require,
}

impl FromStr for DbSslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" => Ok(DbSslMode::Disable),
            "prefer" => Ok(DbSslMode::Prefer),
            "require" => Ok(DbSslMode::Require),
            _ => Err(ConfigError::Message(format!("Invalid database SSL mode: {}", s))),
        }
    }
}

/// Database password, wiped from memory when dropped.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct DbPassword(String);

impl DbPassword {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DbPassword {
    fn from(password: &str) -> Self {
        DbPassword(password.to_string())
    }
}

impl fmt::Debug for DbPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.redact())
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_db_host")]
    pub db_host: String,

    #[serde(default = "default_db_port")]
    pub db_port: u16,

    #[serde(default)]
    pub db_user: String,

    #[serde(default)]
    pub db_password: DbPassword,

    #[serde(default)]
    pub db_name: String,

    #[serde(default = "default_db_ssl_mode")]
    pub db_ssl_mode: DbSslMode,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_cors_origins", deserialize_with = "string_or_list")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "WorkExperience-API".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_db_host() -> String {
    "localhost".to_string()
}
fn default_db_port() -> u16 {
    5432
}
fn default_db_ssl_mode() -> DbSslMode {
    DbSslMode::Require
}
fn default_db_max_connections() -> u32 {
    5
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

/// Files give a list, the environment gives one comma-separated string;
/// `cors_origins` does the splitting.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(value) => vec![value],
        StringOrList::Many(values) => values,
    })
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_vars(env::vars().collect())
    }

    /// Builds the configuration from the given variables instead of the
    /// process environment. Values stay strings until a field asks for a number.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        let raw_env = vars.get("APP_ENV").cloned().unwrap_or_else(|| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .ignore_empty(true)
                    .source(Some(vars.clone()))
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Hosting platforms hand out a bare PORT
        if !vars.contains_key("APP_PORT") {
            if let Some(port) = vars.get("PORT") {
                config.port = port
                    .parse()
                    .map_err(|_| ConfigError::Message(format!("Invalid PORT value: {}", port)))?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.db_host.trim().is_empty() {
            errors.push("DB_HOST cannot be empty");
        }
        if self.db_user.trim().is_empty() {
            errors.push("DB_USER cannot be empty");
        }
        if self.db_name.trim().is_empty() {
            errors.push("DB_NAME cannot be empty");
        }
        if self.db_max_connections == 0 {
            errors.push("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.worker_count == 0 {
            errors.push("WORKER_COUNT must be at least 1");
        }
        if self.cors_origins().is_empty() {
            errors.push("CORS_ALLOWED_ORIGINS cannot be empty");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &self.db_password)
            .field("db_name", &self.db_name)
            .field("db_ssl_mode", &self.db_ssl_mode)
            .field("db_max_connections", &self.db_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "WorkExperience-API Test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            worker_count: 1,
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "portfolio".to_string(),
            db_password: DbPassword::from("hunter2"),
            db_name: "portfolio".to_string(),
            db_ssl_mode: DbSslMode::Disable,
            db_max_connections: 1,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }

    #[test]
    fn sample_config_is_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn validate_collects_every_problem() {
        let config = AppConfig {
            db_user: String::new(),
            db_name: "  ".to_string(),
            db_max_connections: 0,
            ..sample_config()
        };

        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("DB_USER"));
        assert!(message.contains("DB_NAME"));
        assert!(message.contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", sample_config());

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let config = AppConfig {
            cors_allowed_origins: vec!["https://a.dev, https://b.dev".to_string(), " ".to_string()],
            ..sample_config()
        };

        assert_eq!(config.cors_origins(), vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn ssl_mode_parses_case_insensitively() {
        assert_eq!(DbSslMode::from_str("REQUIRE").unwrap(), DbSslMode::Require);
        assert!(DbSslMode::from_str("verify-full").is_err());
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = AppConfig { port: 3000, ..sample_config() };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn database_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("APP_ENV", "testing"),
            ("APP_DB_HOST", "db.internal"),
            ("APP_DB_USER", "portfolio"),
            ("APP_DB_NAME", "portfolio"),
            ("APP_DB_SSL_MODE", "disable"),
        ]
    }

    #[test]
    fn numeric_looking_credentials_stay_verbatim() {
        let mut pairs = database_vars();
        pairs.push(("APP_DB_PASSWORD", "007"));
        pairs.push(("APP_DB_NAME", "0123"));

        let config = AppConfig::from_vars(vars(&pairs)).unwrap();

        assert_eq!(config.db_password.expose(), "007");
        assert_eq!(config.db_name, "0123");
    }

    #[test]
    fn exponent_password_is_not_parsed_as_float() {
        let mut pairs = database_vars();
        pairs.push(("APP_DB_PASSWORD", "1e3"));

        let config = AppConfig::from_vars(vars(&pairs)).unwrap();

        assert_eq!(config.db_password.expose(), "1e3");
    }

    #[test]
    fn numeric_fields_and_origins_are_read_from_strings() {
        let mut pairs = database_vars();
        pairs.push(("APP_PORT", "8081"));
        pairs.push(("APP_DB_MAX_CONNECTIONS", "3"));
        pairs.push(("APP_CORS_ALLOWED_ORIGINS", "https://a.dev,https://b.dev"));

        let config = AppConfig::from_vars(vars(&pairs)).unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.db_max_connections, 3);
        assert_eq!(config.db_ssl_mode, DbSslMode::Disable);
        assert_eq!(config.cors_origins(), vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn bare_port_is_used_when_app_port_is_unset() {
        let mut pairs = database_vars();
        pairs.push(("PORT", "5005"));

        let config = AppConfig::from_vars(vars(&pairs)).unwrap();

        assert_eq!(config.port, 5005);
    }

    #[test]
    fn password_wipes_on_zeroize() {
        let mut password = DbPassword::from("hunter2");
        password.zeroize();

        assert!(password.expose().is_empty());
        assert_eq!(format!("{:?}", password), "[MISSING]");
    }
}
