use std::env;

/// Runtime settings, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub renderer_url: String,
    pub renderer_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            host: env::var("CERTIFY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("CERTIFY_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(8080),
            database_path: env::var("CERTIFY_DATABASE")
                .unwrap_or_else(|_| "certify.sqlite".to_string()),
            renderer_url: env::var("CERTIFY_RENDERER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000/api/v1/certificates".to_string()),
            renderer_timeout_secs: env::var("CERTIFY_RENDERER_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(30),
        }
    }
}
