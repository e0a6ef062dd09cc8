use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gamma: GammaConfig,
    #[serde(default)]
    pub tags: TagsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GammaConfig {
    #[serde(default = "default_gamma_url")]
    pub base_url: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagsConfig {
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
}

fn default_gamma_url() -> String { "https://gamma-api.polymarket.com".to_string() }
fn default_site_url() -> String { "https://polymarket.com".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_model_endpoint() -> String { "http://127.0.0.1:8080".to_string() }
fn default_max_new_tokens() -> u32 { 500 }
fn default_temperature() -> f32 { 0.1 }
fn default_max_tags() -> usize { 30 }

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            base_url: default_gamma_url(),
            site_url: default_site_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            max_tags: default_max_tags(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults, then apply
    /// environment overrides (`.env` is honoured).
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        dotenv::dotenv().ok();
        config.apply_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("POLYMARKET_GAMMA_URL") {
            self.gamma.base_url = url;
        }
        if let Some(url) = lookup("POLYMARKET_SITE_URL") {
            self.gamma.site_url = url;
        }
        if let Some(url) = lookup("LOCAL_MODEL_URL") {
            self.tags.endpoint = url;
        }
    }
}
