use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Route of the token-issuing login endpoint. The path has moved around
    /// between deployments, so it stays configurable.
    pub login_path: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let login_path = std::env::var("LOGIN_PATH").unwrap_or_else(|_| "/auth/token".into());
        Ok(Self {
            database_url,
            host,
            port,
            login_path,
        })
    }
}
