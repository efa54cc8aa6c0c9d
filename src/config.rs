use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub currency: String,
    pub cors_origins: Vec<String>,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY is not set"))?;

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(4001);
        let jwt_ttl_hours = env::var("JWT_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        let stripe_api_base = env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let currency = env::var("PAYMENT_CURRENCY")
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|_| "inr".to_string());
        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec!["http://localhost:5173".to_string()]);
        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl_hours,
            stripe_secret_key,
            stripe_api_base,
            currency,
            cors_origins,
            cookie_secure,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
