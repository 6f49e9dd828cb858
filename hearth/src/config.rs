use serde::Deserialize;
use std::env;

use crate::models::DEFAULT_DURATION_MINUTES;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub practice: PracticeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
    /// Reported as the connected user by the diagnostic endpoints.
    pub user: String,
    pub busy_timeout_ms: u64,
    pub journal_mode: String,
    pub synchronous: String,
}

/// Knobs for the practice views.
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeConfig {
    pub seed_path: Option<String>,
    /// Mood entries drawn in the patient list sparkline; 0 draws all.
    pub sparkline_window: usize,
    /// Notes shown next to the focused appointment.
    pub recent_notes: usize,
    pub default_duration_minutes: u32,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            sparkline_window: 5,
            recent_notes: 2,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "file:hearth.db".to_string(),
            auth_token: None,
            local_path: None,
            user: "local".to_string(),
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let practice = PracticeConfig::default();
        let database = DatabaseConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("HEARTH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("HEARTH_PORT", 3000),
                api_keys: env::var("HEARTH_API_KEYS")
                    .map(|keys| parse_api_keys(&keys))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(database.url),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
                user: env::var("DATABASE_USER").unwrap_or(database.user),
                busy_timeout_ms: parse_env_or("DATABASE_BUSY_TIMEOUT_MS", database.busy_timeout_ms),
                journal_mode: env::var("DATABASE_JOURNAL_MODE").unwrap_or(database.journal_mode),
                synchronous: env::var("DATABASE_SYNCHRONOUS").unwrap_or(database.synchronous),
            },
            practice: PracticeConfig {
                seed_path: env::var("HEARTH_SEED_PATH").ok().filter(|p| !p.is_empty()),
                sparkline_window: parse_env_or("HEARTH_SPARKLINE_WINDOW", practice.sparkline_window),
                recent_notes: parse_env_or("HEARTH_RECENT_NOTES", practice.recent_notes),
                default_duration_minutes: parse_env_or(
                    "HEARTH_DEFAULT_DURATION_MINUTES",
                    practice.default_duration_minutes,
                ),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
