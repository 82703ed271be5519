use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use crate::{
    constants::WORKEXPERIENCE_TABLE,
    settings::{AppConfig, DbSslMode},
};

pub const CREATE_WORKEXPERIENCE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS workexperience (
        id SERIAL PRIMARY KEY,
        companyname VARCHAR(255) NOT NULL,
        jobtitle VARCHAR(255) NOT NULL,
        location VARCHAR(255) NOT NULL,
        startdate DATE NOT NULL,
        enddate DATE NOT NULL,
        description TEXT NOT NULL
    )
"#;

impl From<DbSslMode> for PgSslMode {
    fn from(mode: DbSslMode) -> Self {
        // None of these modes verify the server certificate
        match mode {
            DbSslMode::Disable => PgSslMode::Disable,
            DbSslMode::Prefer => PgSslMode::Prefer,
            DbSslMode::Require => PgSslMode::Require,
        }
    }
}

pub fn connect_options(config: &AppConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(config.db_password.expose())
        .database(&config.db_name)
        .ssl_mode(config.db_ssl_mode.into())
}

/// Builds the shared pool without connecting; the first query opens a connection.
pub fn create_pool(config: &AppConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_lazy_with(connect_options(config))
}

/// Creates the `workexperience` table if it does not exist yet.
pub async fn bootstrap_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_WORKEXPERIENCE_TABLE)
        .execute(pool)
        .await
        .map(|_| ())
}

/// Runs the schema bootstrap at startup. Failure is logged and never halts
/// the process; requests then surface storage errors until the table exists.
pub async fn bootstrap(pool: &PgPool) -> bool {
    match bootstrap_schema(pool).await {
        Ok(()) => {
            tracing::info!("Table {} is ready", WORKEXPERIENCE_TABLE);
            true
        }
        Err(e) => {
            tracing::error!("Failed to create table {}: {}", WORKEXPERIENCE_TABLE, e);
            false
        }
    }
}
