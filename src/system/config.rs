use anyhow::{bail, Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://products.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8010;

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = lookup("SECRET").context("SECRET environment variable must be set")?;
        if secret.is_empty() {
            bail!("SECRET environment variable must not be empty");
        }

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {value}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            secret,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
