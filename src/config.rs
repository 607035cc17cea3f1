use crate::i18n::LocaleSettings;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Backend
    /// Base URL of the product/order API. Only the page handlers need it;
    /// its absence does not stop the server or the locale gateway.
    pub api_url: Option<String>,

    // Server
    pub bind_address: String,
    pub port: u16,

    // Locales
    pub locales: LocaleSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let locale_codes = std::env::var("LOCALES").unwrap_or_else(|_| "de,en".to_string());
        let default_locale = std::env::var("DEFAULT_LOCALE").ok();
        let detection = std::env::var("LOCALE_DETECTION")
            .ok()
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "off" | "no"))
            .unwrap_or(true);

        Ok(Self {
            // Backend
            api_url: std::env::var("API_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),

            // Server
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            // Locales
            locales: LocaleSettings::parse(&locale_codes, default_locale.as_deref(), detection)
                .context("Invalid locale configuration (LOCALES / DEFAULT_LOCALE)")?,
        })
    }
}
