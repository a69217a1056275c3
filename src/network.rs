//! Network URL constants and environment overrides.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default push-update WebSocket URL.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";

/// Environment variable overriding the REST base URL.
pub const API_URL_ENV: &str = "CRYPTODASH_API_URL";

/// Environment variable overriding the WebSocket URL.
pub const WS_URL_ENV: &str = "CRYPTODASH_WS_URL";

/// REST base URL from the environment, if set and non-empty.
pub fn api_url_from_env() -> Option<String> {
    non_empty_env(API_URL_ENV)
}

/// WebSocket URL from the environment, if set and non-empty.
pub fn ws_url_from_env() -> Option<String> {
    non_empty_env(WS_URL_ENV)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
