use crate::error::{Error, Result};
use crate::llm::Provider;
use serde::Deserialize;
use std::path::Path;

/// Top-level TOML configuration for the analyzer and report output.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Provider,
    pub model: String,
    pub max_tokens: u32,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Override for tests or self-hosted gateways.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Anthropic,
            model: "claude-3-5-sonnet-latest".into(),
            max_tokens: 4096,
            api_key_env: "ANTHROPIC_API_KEY".into(),
            base_url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "trend-report.html".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Load from `path` when the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        if self.llm.max_tokens == 0 {
            return Err(Error::config("llm.max_tokens must be positive"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(Error::config("llm.timeout_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg: Config = toml::from_str(
            r#"
            [llm]
            provider = "openrouter"
            model = "deepseek/deepseek-chat"
            max_tokens = 2048
            api_key_env = "OPENROUTER_API_KEY"
            timeout_secs = 20

            [output]
            path = "out/report.html"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.llm.provider, Provider::OpenRouter);
        assert_eq!(cfg.llm.max_tokens, 2048);
        assert_eq!(cfg.output.path, "out/report.html");
        cfg.validate().unwrap();
    }

    #[test]
    fn empty_sections_use_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.llm.provider, Provider::Anthropic);
        assert_eq!(cfg.llm.timeout_secs, 30);
        cfg.validate().unwrap();
    }

    #[test]
    fn rejects_empty_model() {
        let cfg: Config = toml::from_str("[llm]\nmodel = \"\"\n").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_max_tokens() {
        let cfg: Config = toml::from_str("[llm]\nmax_tokens = 0\n").unwrap();
        assert!(cfg.validate().is_err());
    }
}
