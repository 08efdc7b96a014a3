use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;

pub const DEFAULT_BUNDLED_CONFIG: &str = "config.env";

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Bundled config holding the API key and model
    pub bundled_config_path: PathBuf,
    /// Overrides the OpenAI endpoint, mainly for local testing
    pub openai_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let bundled_config_path = env::var("BIAS_ANALYZER_CONFIG")
            .unwrap_or_else(|_| DEFAULT_BUNDLED_CONFIG.to_string());
        if bundled_config_path.trim().is_empty() {
            anyhow::bail!("BIAS_ANALYZER_CONFIG must not be empty");
        }

        let openai_base_url = match env::var("OPENAI_BASE_URL") {
            Ok(url) if url.trim().is_empty() => None,
            Ok(url) => Some(
                validate_base_url(&url).context("OPENAI_BASE_URL must be an http(s) URL")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            bundled_config_path: PathBuf::from(bundled_config_path),
            openai_base_url,
        })
    }
}

fn validate_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        anyhow::bail!("unsupported scheme in {}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_requires_http_scheme() {
        assert_eq!(
            validate_base_url(" http://127.0.0.1:9000/v1 ").unwrap(),
            "http://127.0.0.1:9000/v1"
        );
        assert!(validate_base_url("ftp://example.com").is_err());
    }
}
