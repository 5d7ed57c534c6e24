use std::env;

use crate::error::ConsoleError;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub http_port: u16,
    pub log_level: String,
    pub driver_poll_ms: u64,
    pub queue_poll_ms: u64,
    pub request_timeout_ms: u64,
    pub event_buffer_size: usize,
    pub notification_log_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConsoleError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            driver_poll_ms: parse_or_default("DRIVER_POLL_MS", 1000)?,
            queue_poll_ms: parse_or_default("QUEUE_POLL_MS", 200)?,
            request_timeout_ms: parse_or_default("REQUEST_TIMEOUT_MS", 5000)?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            notification_log_size: parse_or_default("NOTIFICATION_LOG_SIZE", 256)?,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, ConsoleError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| ConsoleError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
