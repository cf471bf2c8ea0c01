use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Admin API bearer credential
    pub admin_api_token: Secret<String>,

    // The admin user listing ships disabled; set to true to reactivate the
    // route instead of its 404 stub.
    pub enable_user_listing: bool,

    // Plausible analytics, rendered into the document shell when both are set
    pub analytics_domain: Option<String>,
    pub analytics_script_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for local development)
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        Ok(Self {
            database_url: config.get("database_url")?,
            host: config.get("host").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: config.get("port")?,

            admin_api_token: Secret::new(config.get("admin_api_token")?),

            enable_user_listing: config.get("enable_user_listing").unwrap_or(false),

            analytics_domain: config.get("analytics_domain").ok(),
            analytics_script_url: config.get("analytics_script_url").ok(),
        })
    }
}
