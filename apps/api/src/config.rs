use anyhow::{bail, Context, Result};

use crate::layout::ExportLayoutConfig;

/// Origins the browser client is served from during local development.
pub const DEV_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://127.0.0.1:5500",
    "http://localhost:5500",
];

/// Application configuration loaded from environment variables.
/// Startup fails if a value is malformed, or if production has no frontend origin.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub app_env: String,
    pub frontend_url: Option<String>,
    /// Text generation is disabled when unset.
    pub openai_api_key: Option<String>,
    pub max_words: u32,
    /// Export layout applied before per-request overrides.
    pub export_defaults: ExportLayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            rust_log: "info".to_string(),
            app_env: "development".to_string(),
            frontend_url: None,
            openai_api_key: None,
            max_words: 10_000,
            export_defaults: ExportLayoutConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset and blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let mut export_defaults = defaults.export_defaults;
        if let Some(v) = get("EXPORT_SHOW_HEADER") {
            export_defaults.show_header = parse_flag("EXPORT_SHOW_HEADER", &v)?;
        }
        if let Some(v) = get("EXPORT_SHOW_FOOTER") {
            export_defaults.show_footer = parse_flag("EXPORT_SHOW_FOOTER", &v)?;
        }
        if let Some(v) = get("EXPORT_SHOW_BRANDING") {
            export_defaults.show_branding = parse_flag("EXPORT_SHOW_BRANDING", &v)?;
        }
        if let Some(v) = get("EXPORT_SHOW_SEPARATOR") {
            export_defaults.show_separator_line = parse_flag("EXPORT_SHOW_SEPARATOR", &v)?;
        }

        let config = Config {
            port: match get("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            app_env: get("APP_ENV").unwrap_or(defaults.app_env),
            frontend_url: get("FRONTEND_URL"),
            openai_api_key: get("OPENAI_API_KEY"),
            max_words: match get("MAX_WORDS") {
                Some(v) => v
                    .parse::<u32>()
                    .context("MAX_WORDS must be a positive integer")?,
                None => defaults.max_words,
            },
            export_defaults,
        };

        if config.max_words == 0 {
            bail!("MAX_WORDS must be a positive integer");
        }
        if config.is_production() && config.frontend_url.is_none() {
            bail!("Required environment variable 'FRONTEND_URL' is not set (APP_ENV=production)");
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// CORS origins: the frontend in production, the local dev servers otherwise.
    pub fn allowed_origins(&self) -> Vec<String> {
        match (&self.frontend_url, self.is_production()) {
            (Some(url), true) => vec![url.clone()],
            _ => DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}
