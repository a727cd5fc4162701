use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub crm: CrmConfig,
    pub whatsapp: WhatsAppConfig,
    pub places: PlacesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    pub base_url: String,
    /// Bearer token; server-side secret, never sent to the browser.
    pub token: String,
    #[serde(default = "default_crm_timeout")]
    pub timeout_seconds: u64,
}

fn default_crm_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct WhatsAppConfig {
    /// Destination number for the handoff link, digits only.
    pub phone_number: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlacesConfig {
    #[serde(default = "default_readiness_timeout")]
    pub readiness_timeout_seconds: u64,
    #[serde(default)]
    pub known_places: Vec<String>,
}

fn default_readiness_timeout() -> u64 {
    5
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment, e.g. RESAVA__CRM__TOKEN
            .add_source(config::Environment::with_prefix("RESAVA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
