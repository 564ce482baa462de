use std::env;

const DEFAULT_SNAP_URL: &str = "https://app.sandbox.midtrans.com/snap/v1/transactions";
const DEFAULT_GATEWAY_API_URL: &str = "https://api.sandbox.midtrans.com/v2";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub gateway: GatewayConfig,
}

/// Midtrans Snap settings.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server_key: String,
    pub snap_url: String,
    pub api_base_url: String,
    pub finish_url: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);
        let jwt_secret = env::var("JWT_SECRET")?;
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            gateway: GatewayConfig::from_env(port)?,
        })
    }
}

impl GatewayConfig {
    fn from_env(port: u16) -> anyhow::Result<Self> {
        let server_key = env::var("MIDTRANS_SERVER_KEY")?;
        let snap_url = env::var("MIDTRANS_SNAP_URL").unwrap_or_else(|_| DEFAULT_SNAP_URL.into());
        let api_base_url =
            env::var("MIDTRANS_API_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_API_URL.into());
        let finish_url = env::var("MIDTRANS_FINISH_URL").unwrap_or_else(|_| {
            format!("http://localhost:{port}/api/transactions/finish_payment")
        });
        let timeout_secs = env::var("MIDTRANS_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(15);
        Ok(Self {
            server_key,
            snap_url,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            finish_url,
            timeout_secs,
        })
    }
}
