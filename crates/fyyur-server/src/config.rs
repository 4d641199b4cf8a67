use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Origins allowed to call the API cross-origin; empty means none.
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr = env::var("FYYUR_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        Self {
            bind_addr: parse_bind_addr(&bind_addr),
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default()),
        }
    }
}

fn parse_bind_addr(raw: &str) -> SocketAddr {
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(value = %raw, "invalid FYYUR_BIND_ADDR, using {DEFAULT_BIND_ADDR}");
        SocketAddr::from(([0, 0, 0, 0], 8080))
    })
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match HeaderValue::from_str(s) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %s, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
