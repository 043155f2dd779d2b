use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Environment variable holding the LLM provider credential.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ai_model: AiModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiModelConfig {
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to read config file {}. Make sure it exists.",
                path.display()
            )
        })?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Read the provider API key from the environment.
    pub fn api_key() -> Result<String> {
        std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .with_context(|| format!("{} must be set", API_KEY_VAR))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3000
        allowed_origins = ["http://localhost:5173"]

        [ai_model]
        provider = "groq"
        model = "llama-3.3-70b-versatile"
        endpoint = "https://api.groq.com/openai/v1"
        temperature = 0.6
        max_tokens = 350
        timeout_secs = 20

        [logging]
        level = "debug"
    "#;

    #[test]
    fn test_config_parsing() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.ai_model.model, "llama-3.3-70b-versatile");
        assert_eq!(config.ai_model.max_tokens, 350);
        assert_eq!(config.ai_model.timeout_secs, 20);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_optional_sections_default() {
        let toml_str = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [ai_model]
            provider = "groq"
            model = "llama-3.3-70b-versatile"
            endpoint = "https://api.groq.com/openai/v1"
            temperature = 0.6
            max_tokens = 350
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.ai_model.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_shipped_config_parses() {
        let content = include_str!("../config.toml");
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.ai_model.provider, "groq");
    }
}
