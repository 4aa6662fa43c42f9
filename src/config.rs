use std::env;

/// Connection parameters for the relational store. Defaults point at a local
/// MySQL instance, which is where the back office normally runs.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    url_override: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 3306,
            database: "dark_kitchen".to_owned(),
            username: "root".to_owned(),
            password: String::new(),
            url_override: None,
        }
    }
}

impl DbConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            username: username.into(),
            password: password.into(),
            url_override: None,
        }
    }

    /// Bypasses the host/port fields entirely and connects to the given URL.
    /// Tests use this to point at in-memory SQLite.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url_override: Some(url.into()),
            ..Default::default()
        }
    }

    /// Reads `DATABASE_URL` if set, otherwise assembles the config from the
    /// individual `DK_DB_*` variables, falling back to the defaults.
    pub fn from_env() -> Self {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Self::from_url(url);
        }

        let base = Self::default();
        Self {
            host: env::var("DK_DB_HOST").unwrap_or(base.host),
            port: env::var("DK_DB_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(base.port),
            database: env::var("DK_DB_NAME").unwrap_or(base.database),
            username: env::var("DK_DB_USER").unwrap_or(base.username),
            password: env::var("DK_DB_PASSWORD").unwrap_or(base.password),
            url_override: None,
        }
    }

    pub fn url(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None => format!(
                "mysql://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.database
            ),
        }
    }

    /// Operator-facing summary, credentials left out.
    pub fn connection_info(&self) -> String {
        format!(
            "Host: {}:{} | Database: {} | User: {}",
            self.host, self.port, self.database, self.username
        )
    }
}
