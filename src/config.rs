use std::env;
use anyhow::{bail, Context, Result};
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://api.nasa.gov";
const DEFAULT_IMAGES_BASE_URL: &str = "https://images-api.nasa.gov";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base_url: Url,
    pub images_base_url: Url,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("API_KEY").ok().filter(|key| !key.trim().is_empty());

        let api_base_url = parse_base_url(
            "NASA_API_BASE_URL",
            &env::var("NASA_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let images_base_url = parse_base_url(
            "NASA_IMAGES_BASE_URL",
            &env::var("NASA_IMAGES_BASE_URL").unwrap_or_else(|_| DEFAULT_IMAGES_BASE_URL.to_string()),
        )?;

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            api_key,
            api_base_url,
            images_base_url,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API key: {}",
            if self.api_key.is_some() { "set" } else { "unset (DEMO_KEY fallback where allowed)" });
        tracing::info!("  Upstream API: {}", self.api_base_url);
        tracing::info!("  Upstream image library: {}", self.images_base_url);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn parse_base_url(var: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("{} must be an absolute URL, got '{}'", var, raw))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        bail!("{} must be an http(s) base URL, got '{}'", var, raw);
    }
    Ok(url)
}
