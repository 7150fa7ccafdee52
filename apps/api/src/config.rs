use anyhow::{Context, Result};

const DEFAULT_ALLOWED_EXTENSIONS: &str = "pdf";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Lowercase file extensions accepted for `resume_file` uploads.
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: usize,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            allowed_extensions: parse_extensions(
                &std::env::var("ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
            ),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
        })
    }

    /// True when the filename carries an extension from the allow-list.
    /// `resume.PDF` matches `pdf`; a name without a dot never matches.
    pub fn allows_file(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_extensions(raw: &str) -> Vec<String> {
    let mut extensions: Vec<String> = raw
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect();
    extensions.sort();
    extensions.dedup();
    extensions
}

#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/resumesense_test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        allowed_extensions: vec!["pdf".to_string()],
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        db_max_connections: 1,
    }
}
