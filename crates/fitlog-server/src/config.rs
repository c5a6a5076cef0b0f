//! Server configuration loaded from environment variables

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// SQLite database file; `None` selects the in-memory store
    pub database_path: Option<String>,
    /// Directory the static browser client is served from
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3002".to_string());

        let database_path = std::env::var("DATABASE_PATH").ok().filter(|p| !p.is_empty());

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        Self {
            bind_address,
            database_path,
            static_dir,
        }
    }

    /// Short label for startup logs
    pub fn storage_label(&self) -> &str {
        match &self.database_path {
            Some(path) => path.as_str(),
            None => "memory",
        }
    }
}
